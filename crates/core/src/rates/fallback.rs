use chrono::Utc;

use crate::quotes::Quote;

/// Fixed BRL→USD quote at 5.00, stamped with the current time.
pub fn mock_quote() -> Quote {
    Quote::fallback(Utc::now())
}
