// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) wires these modules together to run the publishing demo.
//
// Module responsibilities:
// - `config`: Resolves the API base URL and key from the environment, a
//   key file in the home directory, or built-in defaults.
// - `api`: Encapsulates HTTP interactions with the content API (list
//   categories and authors, create an article) and the wire types.
// - `error`: The failure taxonomy of a single API call.
// - `sample`: The static article payload the demo publishes.
// - `ui`: Prints the outcome of each call and runs the demo flow.
pub mod api;
pub mod config;
pub mod error;
pub mod sample;
pub mod ui;
