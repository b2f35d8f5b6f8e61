use std::fmt;
use std::str::FromStr;

/// Back-office sections, one per managed table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Players,
    Decks,
    Tournaments,
    Equipments,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Players,
        Section::Decks,
        Section::Tournaments,
        Section::Equipments,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Section::Players => "players",
            Section::Decks => "decks",
            Section::Tournaments => "tournaments",
            Section::Equipments => "equipments",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.slug() == s.to_lowercase())
            .ok_or_else(|| format!("Unknown section: {}", s))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Players,
    Player(String),
    Equipments,
    Sponsors,
    Contacts,
    Login,
    Admin,
    AdminList(Section),
    AdminNew(Section),
    AdminEdit(Section, String),
    NotFound,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Players => "/players".to_string(),
            Route::Player(id) => format!("/players/{}", id),
            Route::Equipments => "/equipments".to_string(),
            Route::Sponsors => "/sponsors".to_string(),
            Route::Contacts => "/contacts".to_string(),
            Route::Login => "/log-in".to_string(),
            Route::Admin => "/admin".to_string(),
            Route::AdminList(section) => format!("/admin/{}", section),
            Route::AdminNew(section) => format!("/admin/{}/new", section),
            Route::AdminEdit(section, id) => format!("/admin/{}/edit/{}", section, id),
            Route::NotFound => "/404".to_string(),
        }
    }

    /// Match a path, ignoring any query string
    pub fn from_path(path: &str) -> Self {
        let path = path.split('?').next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["players"] => Route::Players,
            ["players", id] => Route::Player(id.to_string()),
            ["equipments"] => Route::Equipments,
            ["sponsors"] => Route::Sponsors,
            ["contacts"] => Route::Contacts,
            ["log-in"] => Route::Login,
            ["admin"] => Route::Admin,
            ["admin", section] => section.parse().map(Route::AdminList).unwrap_or(Route::NotFound),
            ["admin", section, "new"] => section.parse().map(Route::AdminNew).unwrap_or(Route::NotFound),
            ["admin", section, "edit", id] => section
                .parse()
                .map(|s| Route::AdminEdit(s, id.to_string()))
                .unwrap_or(Route::NotFound),
            _ => Route::NotFound,
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Admin | Route::AdminList(_) | Route::AdminNew(_) | Route::AdminEdit(_, _)
        )
    }

    /// Where to go given the auth state: guarded routes send anonymous
    /// users to the login page, and signed-in users skip the login page.
    pub fn resolve(self, authenticated: bool) -> Route {
        match self {
            route if route.requires_auth() && !authenticated => Route::Login,
            Route::Login if authenticated => Route::Admin,
            route => route,
        }
    }
}
