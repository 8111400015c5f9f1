/// Modal panels reachable from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Crimes,
    Bank,
    HigherLower,
    OddsEvens,
    Travel,
    Attack,
    Mail,
    Chat,
    Family,
    Stocks,
}

impl Panel {
    pub const ALL: [Self; 10] = [
        Self::Crimes,
        Self::Bank,
        Self::HigherLower,
        Self::OddsEvens,
        Self::Travel,
        Self::Attack,
        Self::Mail,
        Self::Chat,
        Self::Family,
        Self::Stocks,
    ];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Crimes => "Crimes",
            Self::Bank => "Bank",
            Self::HigherLower => "Higher or Lower",
            Self::OddsEvens => "Odds or Evens",
            Self::Travel => "Airport",
            Self::Attack => "Attack",
            Self::Mail => "Mail",
            Self::Chat => "Chat",
            Self::Family => "Families",
            Self::Stocks => "Stock market",
        }
    }

    /// DOM id of the menu button, used to return focus when the modal closes.
    #[must_use]
    pub const fn button_id(self) -> &'static str {
        match self {
            Self::Crimes => "open-crimes",
            Self::Bank => "open-bank",
            Self::HigherLower => "open-hilo",
            Self::OddsEvens => "open-odds-evens",
            Self::Travel => "open-travel",
            Self::Attack => "open-attack",
            Self::Mail => "open-mail",
            Self::Chat => "open-chat",
            Self::Family => "open-family",
            Self::Stocks => "open-stocks",
        }
    }
}
