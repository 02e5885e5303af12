// The article the demo publishes. The payload is static: one request,
// sent as-is, exercising every field the creation endpoint accepts.

use crate::api::{ArticleRequest, ArticleStatus, Source};

/// Category id of "Mobile" on the reference database. Not checked against
/// the fetched category list.
pub const MOBILE_CATEGORY_ID: i64 = 2;

const FOLDABLES_CONTENT: &str = r#"
    <h2>Une nouvelle génération de smartphones pliables</h2>
    <p>2025 marque un tournant pour les smartphones pliables. Les fabricants ont enfin résolu
    les problèmes de durabilité qui ont longtemps entravé l'adoption de cette technologie.</p>

    <h3>Le top 5 des smartphones pliables</h3>
    <ol>
        <li><strong>Samsung Galaxy Z Fold 6</strong> - Le pionnier s'améliore encore</li>
        <li><strong>Google Pixel Fold 2</strong> - L'expérience Android pure</li>
        <li><strong>OnePlus Open 2</strong> - Le meilleur rapport qualité-prix</li>
        <li><strong>Xiaomi Mix Fold 4</strong> - L'innovation chinoise</li>
        <li><strong>Honor Magic V3</strong> - Le plus fin du marché</li>
    </ol>

    <h3>Samsung Galaxy Z Fold 6 : Notre choix n°1</h3>
    <p>Samsung continue de dominer le marché avec le Z Fold 6. Cette 6ème génération apporte :</p>
    <ul>
        <li>Écran interne de 7.6 pouces avec 120Hz adaptatif</li>
        <li>Puce Snapdragon 8 Gen 3 optimisée</li>
        <li>Batterie de 4800mAh avec charge 45W</li>
        <li>Certification IPX8 (résistance à l'eau)</li>
        <li>S Pen intégré dans la charnière</li>
    </ul>

    <h3>Google Pixel Fold 2 : L'intelligence artificielle au service du pliable</h3>
    <p>Google mise tout sur l'IA avec Gemini intégré directement dans le système.
    Les fonctionnalités phares incluent :</p>
    <ul>
        <li>Traduction instantanée en mode "livre"</li>
        <li>Retouche photo avancée avec Magic Editor</li>
        <li>Assistant vocal contextuellement aware</li>
        <li>Caméra Tensor G4 avec zoom optique 5x</li>
    </ul>

    <blockquote>
        <p>"Les smartphones pliables ne sont plus un gadget. Ils représentent désormais
        25% des ventes de smartphones premium." - IDC Research, Janvier 2025</p>
    </blockquote>

    <h3>Prix et disponibilité</h3>
    <table>
        <thead>
            <tr><th>Modèle</th><th>Prix</th><th>Disponibilité</th></tr>
        </thead>
        <tbody>
            <tr><td>Samsung Galaxy Z Fold 6</td><td>1899€</td><td>Disponible</td></tr>
            <tr><td>Google Pixel Fold 2</td><td>1799€</td><td>Pré-commande</td></tr>
            <tr><td>OnePlus Open 2</td><td>1499€</td><td>Disponible</td></tr>
        </tbody>
    </table>

    <h3>Notre verdict</h3>
    <p>Si vous cherchez le meilleur smartphone pliable, le Samsung Galaxy Z Fold 6 reste
    notre recommandation principale pour sa maturité et son écosystème. Le Pixel Fold 2
    est parfait pour les fans de Google et d'IA, tandis que le OnePlus Open 2 offre le
    meilleur rapport qualité-prix.</p>
"#;

/// Comparison of the 2025 foldable smartphones, filed under Mobile and
/// published straight away.
pub fn foldables_article() -> ArticleRequest {
    ArticleRequest {
        title: "Les smartphones pliables de 2025 : Notre comparatif complet".into(),
        content: FOLDABLES_CONTENT.into(),
        excerpt: "Découvrez notre comparatif complet des meilleurs smartphones pliables de 2025. \
                  Samsung, Google, OnePlus : quel modèle choisir ? Prix, caractéristiques et notre verdict."
            .into(),
        status: ArticleStatus::Approved,
        cover_image_path: "https://images.unsplash.com/photo-1598327105666-5b89351aff97?w=1200&h=630".into(),
        cover_image_alt: "Smartphone pliable Samsung Galaxy Z Fold ouvert".into(),
        category_ids: vec![MOBILE_CATEGORY_ID],
        seo_title: "Smartphones Pliables 2025 : Comparatif & Guide d'achat".into(),
        seo_description: "Comparatif des meilleurs smartphones pliables 2025 : Samsung Z Fold 6, \
                          Pixel Fold 2, OnePlus Open 2. Tests, prix, caractéristiques et notre verdict."
            .into(),
        seo_keywords: "smartphone pliable, Galaxy Z Fold 6, Pixel Fold 2, OnePlus Open 2, \
                       comparatif 2025, téléphone pliant"
            .into(),
        sources: vec![
            Source::new("Samsung France", "https://www.samsung.com/fr/"),
            Source::new("Google Store", "https://store.google.com/"),
            Source::new("GSMArena", "https://www.gsmarena.com"),
            Source::new("IDC Research", "https://www.idc.com"),
        ],
        slug: None,
        reading_time: None,
        author_id: None,
    }
}
