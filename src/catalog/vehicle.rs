use serde::{Deserialize, Serialize};

/// A vehicle in the catalog. Identity is the model name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub model: String,
    pub trim: String,
    pub year: u16,
    /// Starting price in US dollars
    pub price: u32,
    /// Image reference, relative to the asset root
    pub image: String,
    pub features: Vec<String>,
    pub available: bool,
}

impl Vehicle {
    /// Price formatted with thousands separators, e.g. `$83,000`.
    pub fn display_price(&self) -> String {
        let digits = self.price.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        format!("${out}")
    }

    pub fn availability_label(&self) -> &'static str {
        if self.available {
            "In Stock"
        } else {
            "Order Only"
        }
    }
}
