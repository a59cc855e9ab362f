/// Display metadata for a backend currency id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    pub id: u32,
    pub code: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
}

static CURRENCIES: [Currency; 3] = [
    Currency {
        id: 1,
        code: "EUR",
        symbol: "€",
        name: "Euro",
    },
    Currency {
        id: 2,
        code: "USD",
        symbol: "$",
        name: "US Dollar",
    },
    Currency {
        id: 9,
        code: "GBP",
        symbol: "£",
        name: "British Pound",
    },
];

/// Looks up a currency by its backend id.
pub fn currency(id: u32) -> Option<&'static Currency> {
    CURRENCIES.iter().find(|c| c.id == id)
}
