//! Game hub catalogue
//!
//! The landing page lists these entries as cards.

use serde::{Deserialize, Serialize};

/// Release state shown on a game card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameStatus {
    Available,
    ComingSoon,
    InDevelopment,
}

impl GameStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GameStatus::Available => "Play Now",
            GameStatus::ComingSoon => "Coming Soon",
            GameStatus::InDevelopment => "In Development",
        }
    }

    /// Whether the card links through to the game
    pub fn is_playable(&self) -> bool {
        !matches!(self, GameStatus::ComingSoon)
    }
}

/// One game card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub status: GameStatus,
    pub route: &'static str,
}

const CATALOGUE: &[GameEntry] = &[GameEntry {
    id: "cosmic-drift",
    title: "Cosmic Drift",
    description: "Navigate through a neon wormhole, dodge obstacles, and collect power-ups in this infinite runner!",
    status: GameStatus::InDevelopment,
    route: "/games/cosmic-drift",
}];

/// All listed games, in display order
pub fn catalogue() -> &'static [GameEntry] {
    CATALOGUE
}

/// Look up a game by route. A trailing `/play` resolves to the same game.
pub fn find(route: &str) -> Option<&'static GameEntry> {
    let route = route.trim_end_matches('/');
    let route = route.strip_suffix("/play").unwrap_or(route);
    CATALOGUE.iter().find(|g| g.route == route)
}

impl GameEntry {
    /// Card markup for the landing page list
    pub fn card_html(&self) -> String {
        let action = if self.status.is_playable() {
            format!(r#"<a class="game-link" href="{}/play">{}</a>"#, self.route, self.status.label())
        } else {
            format!(r#"<span class="game-soon">{}</span>"#, self.status.label())
        };
        format!(
            r#"<li class="game-card" data-game="{}"><h2>{}</h2><p>{}</p>{}</li>"#,
            self.id, self.title, self.description, action
        )
    }
}

/// Markup for every card, in display order
pub fn catalogue_html() -> String {
    CATALOGUE.iter().map(GameEntry::card_html).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_lists_cosmic_drift() {
        let games = catalogue();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].id, "cosmic-drift");
        assert!(games[0].status.is_playable());
    }

    #[test]
    fn test_find_by_route() {
        assert_eq!(find("/games/cosmic-drift").map(|g| g.id), Some("cosmic-drift"));
        assert_eq!(find("/games/cosmic-drift/play").map(|g| g.id), Some("cosmic-drift"));
        assert_eq!(find("/games/cosmic-drift/").map(|g| g.id), Some("cosmic-drift"));
        assert!(find("/games/unknown").is_none());
    }

    #[test]
    fn test_card_links_playable_games() {
        let html = catalogue_html();
        assert!(html.starts_with(r#"<li class="game-card" data-game="cosmic-drift">"#));
        assert!(html.contains(r#"href="/games/cosmic-drift/play""#));
        assert!(html.contains("In Development"));

        let soon = GameEntry {
            id: "later",
            title: "Later",
            description: "",
            status: GameStatus::ComingSoon,
            route: "/games/later",
        };
        assert!(!soon.card_html().contains("href"));
    }

    #[test]
    fn test_status_serializes_kebab() {
        let json = serde_json::to_string(&GameStatus::InDevelopment).unwrap();
        assert_eq!(json, "\"in-development\"");
    }
}
