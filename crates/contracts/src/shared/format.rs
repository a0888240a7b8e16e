use serde::{Deserialize, Serialize};

/// Locale-dependent number formatting.
///
/// Separators and currency symbol are data, not code: the UI picks a
/// locale once instead of hard-coding one formatting convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleFormat {
    pub decimal_sep: char,
    pub group_sep: char,
    pub currency_symbol: String,
    /// Whether the currency symbol trails the amount ("1.234,50 €")
    pub symbol_after: bool,
}

impl LocaleFormat {
    /// Spanish convention: dot for thousands, comma for decimals,
    /// trailing euro sign.
    pub fn es_es() -> Self {
        Self {
            decimal_sep: ',',
            group_sep: '.',
            currency_symbol: "€".to_string(),
            symbol_after: true,
        }
    }

    pub fn en_us() -> Self {
        Self {
            decimal_sep: '.',
            group_sep: ',',
            currency_symbol: "$".to_string(),
            symbol_after: false,
        }
    }

    /// Format with thousands separators and a fixed number of decimals
    pub fn format_number(&self, value: f64, decimals: u32) -> String {
        let negative = value < 0.0;
        let abs = value.abs();
        let fixed = format!("{:.*}", decimals as usize, abs);
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((i, f)) => (i.to_string(), Some(f.to_string())),
            None => (fixed, None),
        };

        let mut grouped = String::new();
        for (i, ch) in int_part.chars().rev().enumerate() {
            if i > 0 && i % 3 == 0 {
                grouped.push(self.group_sep);
            }
            grouped.push(ch);
        }
        let mut result: String = grouped.chars().rev().collect();

        if let Some(frac) = frac_part {
            result.push(self.decimal_sep);
            result.push_str(&frac);
        }
        if negative {
            result.insert(0, '-');
        }
        result
    }

    /// Format a currency amount with 2 decimals
    pub fn format_currency(&self, value: f64) -> String {
        let number = self.format_number(value, 2);
        if self.symbol_after {
            format!("{} {}", number, self.currency_symbol)
        } else {
            format!("{}{}", self.currency_symbol, number)
        }
    }

    /// Format a value already expressed in percent, 2 decimals
    pub fn format_percentage(&self, value: f64) -> String {
        format!("{}%", self.format_number(value, 2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_es() {
        let es = LocaleFormat::es_es();
        assert_eq!(es.format_number(0.0, 2), "0,00");
        assert_eq!(es.format_number(42.0, 0), "42");
        assert_eq!(es.format_number(1234.5, 2), "1.234,50");
        assert_eq!(es.format_number(1234567.0, 0), "1.234.567");
        assert_eq!(es.format_number(-1234.5, 2), "-1.234,50");
    }

    #[test]
    fn test_format_currency() {
        let es = LocaleFormat::es_es();
        assert_eq!(es.format_currency(1500.0), "1.500,00 €");
        let us = LocaleFormat::en_us();
        assert_eq!(us.format_currency(1500.0), "$1,500.00");
    }

    #[test]
    fn test_format_percentage() {
        let es = LocaleFormat::es_es();
        assert_eq!(es.format_percentage(12.5), "12,50%");
    }
}
