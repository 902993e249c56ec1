//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// Itinerary request prompt (the user turn)
pub const ITINERARY: &str = include_str!("../../prompts/itinerary.pmt");

/// Assistant persona and JSON-only instruction
pub const SYSTEM: &str = include_str!("../../prompts/system.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "itinerary" => {
            debug!("get_embedded: matched itinerary");
            Some(ITINERARY)
        }
        "system" => {
            debug!("get_embedded: matched system");
            Some(SYSTEM)
        }
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_embedded_itinerary() {
        let itinerary = get_embedded("itinerary").unwrap();
        assert!(itinerary.contains("senior travel consultant"));
        assert!(itinerary.contains("{{origin_city}}"));
        assert!(itinerary.contains("{{destination}}"));
        assert!(itinerary.contains("{{budget}}"));
        assert!(itinerary.contains("distance-optimized"));
    }

    #[test]
    fn test_get_embedded_system() {
        let system = get_embedded("system").unwrap();
        assert!(system.contains("only valid JSON"));
        assert!(system.contains("markdown"));
    }

    #[test]
    fn test_get_embedded_unknown() {
        assert!(get_embedded("unknown-template").is_none());
    }
}
