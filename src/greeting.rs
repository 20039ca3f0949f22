//! Optional greeting text, isolated from the simulation core.
//!
//! A remote implementation may generate personalized text; anything that
//! fails must degrade to the static fallback without touching animation.

/// Produces a greeting string for a visitor name.
pub trait Greeter {
    /// Greeting for `name`. Implementations must not fail; degrade to
    /// [`fallback`] instead.
    fn greet(&self, name: &str) -> String;
}

/// Fallback greeting used when no service is available.
pub fn fallback() -> String {
    "Season's Greetings.".to_string()
}

/// The built-in offline greeter.
#[derive(Debug, Default)]
pub struct StaticGreeter;

impl Greeter for StaticGreeter {
    fn greet(&self, name: &str) -> String {
        if name.is_empty() {
            return fallback();
        }
        format!("Merry Christmas, {name}!")
    }
}
