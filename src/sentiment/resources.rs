//! # Lexicon Resources
//!
//! One-time, idempotent initialization of the sentiment lexicons. Scorers
//! take the returned `&'static` handles, so nothing can score before the
//! lexicons exist.

use std::sync::OnceLock;
use tracing::{debug, info};

use super::compound::CompoundLexicon;
use super::polarity::PolarityLexicon;

static COMPOUND: OnceLock<CompoundLexicon> = OnceLock::new();
static POLARITY: OnceLock<PolarityLexicon> = OnceLock::new();

/// Result of an initialization call
#[derive(Debug, Clone, Copy)]
pub struct Initialized<T: 'static> {
    /// The process-wide lexicon
    pub lexicon: &'static T,
    /// Whether this call built it (false when it was already present)
    pub performed: bool,
}

/// Handles to both lexicons
#[derive(Debug, Clone, Copy)]
pub struct Lexicons {
    pub compound: &'static CompoundLexicon,
    pub polarity: &'static PolarityLexicon,
}

fn init_once<T>(cell: &'static OnceLock<T>, name: &str, build: fn() -> T) -> Initialized<T> {
    let mut performed = false;
    let lexicon = cell.get_or_init(|| {
        performed = true;
        build()
    });

    if performed {
        info!("Initialized {} lexicon", name);
    } else {
        debug!("{} lexicon already present, skipping", name);
    }

    Initialized { lexicon, performed }
}

/// Build the VADER lexicon if it is not loaded yet
pub fn init_compound_lexicon() -> Initialized<CompoundLexicon> {
    init_once(&COMPOUND, "VADER", CompoundLexicon::new)
}

/// Build the polarity lexicon if it is not loaded yet
pub fn init_polarity_lexicon() -> Initialized<PolarityLexicon> {
    init_once(&POLARITY, "polarity", PolarityLexicon::new)
}

/// Initialize both lexicons
pub fn init_lexicons() -> Lexicons {
    Lexicons {
        compound: init_compound_lexicon().lexicon,
        polarity: init_polarity_lexicon().lexicon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialization_is_idempotent() {
        let first = init_compound_lexicon();
        let second = init_compound_lexicon();
        assert!(!second.performed);
        assert!(std::ptr::eq(first.lexicon, second.lexicon));

        let first = init_polarity_lexicon();
        let second = init_polarity_lexicon();
        assert!(!second.performed);
        assert!(std::ptr::eq(first.lexicon, second.lexicon));
    }
}
