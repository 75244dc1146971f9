//! Localized currency text for dashboard figures.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    /// `$1,234.50`
    Prefix,
    /// `1.234,50 €`
    Suffix,
}

/// How to render an amount of money as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub position: SymbolPosition,
    pub decimal_separator: char,
    pub group_separator: char,
    pub decimals: usize,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::for_locale("en-US").unwrap_or_else(|| Self {
            symbol: "$".to_string(),
            position: SymbolPosition::Prefix,
            decimal_separator: '.',
            group_separator: ',',
            decimals: 2,
        })
    }
}

impl CurrencyFormat {
    /// Preset for a locale tag such as `en-GB`. Unknown tags return `None`.
    pub fn for_locale(locale: &str) -> Option<Self> {
        let (symbol, position, decimal_separator, group_separator, decimals) =
            match locale.to_ascii_lowercase().replace('_', "-").as_str() {
                "en-us" | "en" => ("$", SymbolPosition::Prefix, '.', ',', 2),
                "en-gb" => ("£", SymbolPosition::Prefix, '.', ',', 2),
                "de-de" | "de" => ("€", SymbolPosition::Suffix, ',', '.', 2),
                "fr-fr" | "fr" => ("€", SymbolPosition::Suffix, ',', '\u{202f}', 2),
                "ja-jp" | "ja" => ("¥", SymbolPosition::Prefix, '.', ',', 0),
                _ => return None,
            };
        Some(Self {
            symbol: symbol.to_string(),
            position,
            decimal_separator,
            group_separator,
            decimals,
        })
    }

    /// Render `value` with this format, e.g. `-$1,234.50`.
    pub fn format(&self, value: f64) -> String {
        let fixed = format!("{:.*}", self.decimals, value.abs());
        let (whole, fraction) = match fixed.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (fixed.as_str(), None),
        };

        let mut number = group_digits(whole, self.group_separator);
        if let Some(fraction) = fraction {
            number.push(self.decimal_separator);
            number.push_str(fraction);
        }

        // Rounding can turn a tiny negative into zero; keep "-$0.00" out.
        let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
        let sign = if negative { "-" } else { "" };
        match self.position {
            SymbolPosition::Prefix => format!("{}{}{}", sign, self.symbol, number),
            SymbolPosition::Suffix => format!("{}{} {}", sign, number, self.symbol),
        }
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}
