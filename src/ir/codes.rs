use std::{collections::HashMap, fmt};

/// Buttons of the Sony PLZ530D remote (manufacturer code 0607).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Ch1,
    Ch2,
    Ch3,
    Ch4,
    Ch5,
    Ch6,
    Ch7,
    Ch8,
    Ch9,
    Ch10,
    Ch11,
    Ch12,
    ChPlus,
    ChMinus,
    Blue,
    Red,
    Green,
    Yellow,
    Power,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::Ch1 => "ch1",
            Action::Ch2 => "ch2",
            Action::Ch3 => "ch3",
            Action::Ch4 => "ch4",
            Action::Ch5 => "ch5",
            Action::Ch6 => "ch6",
            Action::Ch7 => "ch7",
            Action::Ch8 => "ch8",
            Action::Ch9 => "ch9",
            Action::Ch10 => "ch10",
            Action::Ch11 => "ch11",
            Action::Ch12 => "ch12",
            Action::ChPlus => "ch_plus",
            Action::ChMinus => "ch_minus",
            Action::Blue => "blue",
            Action::Red => "red",
            Action::Green => "green",
            Action::Yellow => "yellow",
            Action::Power => "power",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const CODES: [(&str, Action); 19] = [
    ("DACBA6CF", Action::Ch1),
    ("E3437029", Action::Ch2),
    ("FD32024F", Action::Ch3),
    ("C20FD44D", Action::Ch4),
    ("D1BDDFBB", Action::Ch5),
    ("F5C2694D", Action::Ch6),
    ("101627FB", Action::Ch7),
    ("B368778E", Action::Ch8),
    ("6828DB74", Action::Ch9),
    ("45F61F06", Action::Ch10),
    ("A95C6BFB", Action::Ch11),
    ("64953EC7", Action::Ch12),
    // The decoder drops the leading zero of this one
    ("506B887", Action::ChPlus),
    ("37B7F8D1", Action::ChMinus),
    ("B000B3FB", Action::Blue),
    ("533DCF5B", Action::Red),
    ("9311C57B", Action::Green),
    ("3B9D6723", Action::Yellow),
    ("FB5BE1FB", Action::Power),
];

#[derive(Clone, Debug)]
pub struct CodeTable {
    codes: HashMap<&'static str, Action>,
}

impl Default for CodeTable {
    fn default() -> Self {
        CodeTable {
            codes: CODES.into_iter().collect(),
        }
    }
}

impl CodeTable {
    pub fn lookup(&self, code: &str) -> Option<Action> {
        self.codes.get(code).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_codes() {
        let table = CodeTable::default();

        for (code, action) in CODES {
            assert_eq!(table.lookup(code), Some(action), "code {}", code);
        }

        assert_eq!(table.lookup("FB5BE1FB"), Some(Action::Power));
        assert_eq!(table.lookup("B000B3FB"), Some(Action::Blue));
        assert_eq!(table.lookup("506B887"), Some(Action::ChPlus));
    }

    #[test]
    fn test_lookup_is_exact_match() {
        let table = CodeTable::default();

        assert_eq!(table.lookup(""), None);
        assert_eq!(table.lookup("FFFFFFFF"), None);
        assert_eq!(table.lookup("fb5be1fb"), None);
        assert_eq!(table.lookup("0506B887"), None);
        assert_eq!(table.lookup(" FB5BE1FB"), None);
    }

    #[test]
    fn test_codes_are_unique() {
        let table = CodeTable::default();
        assert_eq!(table.codes.len(), CODES.len());
    }

    #[test]
    fn test_action_display() {
        assert_eq!(Action::ChPlus.to_string(), "ch_plus");
        assert_eq!(Action::Ch10.to_string(), "ch10");
        assert_eq!(Action::Power.to_string(), "power");
    }
}
