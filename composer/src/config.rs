//! Composer configuration
//!
//! All fields can be overridden through environment variables:
//!
//! | Environment variable | Default | Meaning |
//! |----------------------|---------|---------|
//! | COMPOSER_MAX_QUANTITY | 9999 | Maximum quantity per line |
//! | COMPOSER_MAX_UNIT_PRICE | 1000000 | Maximum unit price |
//! | COMPOSER_MAX_NOTE_LEN | 500 | Maximum note length (chars) |
//! | CURRENCY_SYMBOL | € | Currency symbol for display formatting |
//! | LOCALE | es-ES | Locale tag for the presentation layer |

/// Validation bounds for line and order input
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum allowed quantity per line
    pub max_quantity: i32,
    /// Maximum allowed price per unit
    pub max_unit_price: f64,
    /// Maximum allowed note length in characters
    pub max_note_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_quantity: 9999,
            max_unit_price: 1_000_000.0,
            max_note_len: 500,
        }
    }
}

/// Operator display preferences
#[derive(Debug, Clone)]
pub struct Preferences {
    /// Currency symbol appended by the money formatter
    pub currency_symbol: String,
    /// BCP 47 locale tag (presentation-layer concern, carried through)
    pub locale: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            currency_symbol: "€".into(),
            locale: "es-ES".into(),
        }
    }
}

/// Composer configuration: validation limits plus display preferences
#[derive(Debug, Clone, Default)]
pub struct ComposerConfig {
    pub limits: Limits,
    pub preferences: Preferences,
}

impl ComposerConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable
    pub fn from_env() -> Self {
        let defaults = Limits::default();
        Self {
            limits: Limits {
                max_quantity: std::env::var("COMPOSER_MAX_QUANTITY")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.max_quantity),
                max_unit_price: std::env::var("COMPOSER_MAX_UNIT_PRICE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.max_unit_price),
                max_note_len: std::env::var("COMPOSER_MAX_NOTE_LEN")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.max_note_len),
            },
            preferences: Preferences {
                currency_symbol: std::env::var("CURRENCY_SYMBOL").unwrap_or_else(|_| "€".into()),
                locale: std::env::var("LOCALE").unwrap_or_else(|_| "es-ES".into()),
            },
        }
    }
}
