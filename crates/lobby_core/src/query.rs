use std::fmt;

use url::Url;

/// Archive `forms` filter selecting lobby cards.
pub const LOBBY_CARD_FORM: &str = "Lobby card";

/// Inclusive production-year window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    /// The `years` years before `anchor`, excluding `anchor` itself.
    ///
    /// `lookback(1950, 10)` is `1940-1949`.
    pub fn lookback(anchor: i32, years: u32) -> Self {
        let years = i32::try_from(years.max(1)).unwrap_or(i32::MAX);
        Self {
            start: anchor.saturating_sub(years),
            end: anchor.saturating_sub(1),
        }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// One page request against the archive search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub form_filter: String,
    pub has_media: bool,
    pub page: u32,
    pub page_size: u32,
    pub year_range: YearRange,
}

impl SearchQuery {
    pub fn lobby_cards(year_range: YearRange, has_media: bool, page_size: u32) -> Self {
        Self {
            form_filter: LOBBY_CARD_FORM.to_string(),
            has_media,
            page: 1,
            page_size: page_size.max(1),
            year_range,
        }
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// Query parameters in the order the archive documents them.
    pub fn params(&self) -> [(&'static str, String); 5] {
        [
            ("forms", self.form_filter.clone()),
            ("hasMedia", if self.has_media { "yes" } else { "no" }.to_string()),
            ("page", self.page.to_string()),
            ("limit", self.page_size.to_string()),
            ("year", self.year_range.to_string()),
        ]
    }

    /// Appends this query's parameters to `endpoint`.
    pub fn to_url(&self, endpoint: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(endpoint)?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in self.params() {
                pairs.append_pair(key, &value);
            }
        }
        Ok(url)
    }
}
