use serde::{Deserialize, Serialize};

/// Sortable columns of the coin table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Name,
    Symbol,
    CurrentPrice,
    #[serde(rename = "price_change_percentage_24h")]
    PriceChange24h,
}

impl SortColumn {
    /// Table order.
    pub const ALL: [SortColumn; 4] = [
        SortColumn::Name,
        SortColumn::Symbol,
        SortColumn::CurrentPrice,
        SortColumn::PriceChange24h,
    ];

    /// Text columns compare case-insensitively; the rest numerically.
    pub fn is_textual(&self) -> bool {
        matches!(self, SortColumn::Name | SortColumn::Symbol)
    }

    /// Field name as used by the market data source.
    pub fn field_name(&self) -> &'static str {
        match self {
            SortColumn::Name => "name",
            SortColumn::Symbol => "symbol",
            SortColumn::CurrentPrice => "current_price",
            SortColumn::PriceChange24h => "price_change_percentage_24h",
        }
    }
}

impl std::fmt::Display for SortColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortColumn::Name => write!(f, "Name"),
            SortColumn::Symbol => write!(f, "Symbol"),
            SortColumn::CurrentPrice => write!(f, "Price"),
            SortColumn::PriceChange24h => write!(f, "24h Change (%)"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header arrow shown next to the active column.
    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Active sort of the coin table. Transient, never persisted.
///
/// `column == None` means "keep the filtered order".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDirective {
    pub column: Option<SortColumn>,
    pub direction: SortDirection,
}

impl SortDirective {
    /// No sorting.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn by(column: SortColumn, direction: SortDirection) -> Self {
        Self {
            column: Some(column),
            direction,
        }
    }

    /// Header click: same column flips direction, another column starts ascending.
    #[must_use]
    pub fn clicked(self, column: SortColumn) -> Self {
        if self.column == Some(column) {
            Self {
                column: Some(column),
                direction: self.direction.flipped(),
            }
        } else {
            Self::by(column, SortDirection::Ascending)
        }
    }

    /// Arrow for `column`'s header, if it is the active one.
    pub fn indicator_for(&self, column: SortColumn) -> Option<&'static str> {
        (self.column == Some(column)).then(|| self.direction.indicator())
    }
}
