//! Read-side selectors behind the dashboard screens
//!
//! Everything here is a pure function of a [`DashboardState`] and the current
//! date. Manual records are filtered by artist; external shows belong to the
//! connected booking account and are listed for every artist.

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{PostStatus, Release, ReleaseStatus, Show, ShowRef, SocialPost};
use crate::store::DashboardState;
use crate::time::{days_until, parse_date};

/// Shows within this many days get a countdown label
pub const COUNTDOWN_DAYS: i64 = 14;

pub fn releases_for<'a>(state: &'a DashboardState, artist_id: &str) -> Vec<&'a Release> {
    state
        .releases
        .iter()
        .filter(|r| r.artist_id == artist_id)
        .collect()
}

pub fn manual_shows_for<'a>(state: &'a DashboardState, artist_id: &str) -> Vec<&'a Show> {
    state
        .shows
        .iter()
        .filter(|s| s.artist_id == artist_id)
        .collect()
}

pub fn posts_for<'a>(state: &'a DashboardState, artist_id: &str) -> Vec<&'a SocialPost> {
    state
        .social_posts
        .iter()
        .filter(|p| p.artist_id == artist_id)
        .collect()
}

/// The artist's manual shows followed by every external show
pub fn all_shows<'a>(state: &'a DashboardState, artist_id: &str) -> Vec<ShowRef<'a>> {
    manual_shows_for(state, artist_id)
        .into_iter()
        .map(ShowRef::Manual)
        .chain(state.external_shows.iter().map(ShowRef::External))
        .collect()
}

/// Sort key putting dated records in calendar order and undated ones last
fn date_key(date: &str) -> (bool, Option<NaiveDate>) {
    let parsed = parse_date(date);
    (parsed.is_none(), parsed)
}

/// Shows split around today
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowAgenda<'a> {
    /// Today and later, soonest first
    pub upcoming: Vec<ShowRef<'a>>,
    /// Before today, most recent first
    pub past: Vec<ShowRef<'a>>,
}

/// Upcoming and past shows for an artist; undated shows appear in neither
pub fn agenda<'a>(state: &'a DashboardState, artist_id: &str, today: NaiveDate) -> ShowAgenda<'a> {
    let mut shows = all_shows(state, artist_id);
    shows.sort_by_key(|s| date_key(s.date()));

    let mut agenda = ShowAgenda::default();
    for show in shows {
        match days_until(show.date(), today) {
            Some(days) if days >= 0 => agenda.upcoming.push(show),
            Some(_) => agenda.past.push(show),
            None => {}
        }
    }
    agenda.past.reverse();
    agenda
}

/// `TODAY`, `TOMORROW` or `N days away` for shows in the next two weeks
pub fn countdown_label(days: i64) -> Option<String> {
    match days {
        0 => Some("TODAY".to_string()),
        1 => Some("TOMORROW".to_string()),
        2..=COUNTDOWN_DAYS => Some(format!("{} days away", days)),
        _ => None,
    }
}

/// Headline numbers for one artist
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub releases: usize,
    /// Not yet released
    pub upcoming_releases: usize,
    /// Manual shows for the artist plus all external shows
    pub shows: usize,
    pub upcoming_shows: usize,
    pub external_shows: usize,
    pub posts: usize,
    /// Not yet posted
    pub pending_posts: usize,
}

impl DashboardSummary {
    pub fn compute(state: &DashboardState, artist_id: &str, today: NaiveDate) -> Self {
        let releases = releases_for(state, artist_id);
        let posts = posts_for(state, artist_id);
        let shows = all_shows(state, artist_id);

        Self {
            releases: releases.len(),
            upcoming_releases: upcoming_releases(state, artist_id).len(),
            shows: shows.len(),
            upcoming_shows: shows
                .iter()
                .filter(|s| days_until(s.date(), today).is_some_and(|d| d >= 0))
                .count(),
            external_shows: state.external_shows.len(),
            posts: posts.len(),
            pending_posts: pending_posts(state, artist_id).len(),
        }
    }
}

/// Releases not yet out, by date
pub fn upcoming_releases<'a>(state: &'a DashboardState, artist_id: &str) -> Vec<&'a Release> {
    let mut releases: Vec<_> = releases_for(state, artist_id)
        .into_iter()
        .filter(|r| r.status != ReleaseStatus::Released)
        .collect();
    releases.sort_by_key(|r| date_key(&r.date));
    releases
}

/// Posts not yet published, by date
pub fn pending_posts<'a>(state: &'a DashboardState, artist_id: &str) -> Vec<&'a SocialPost> {
    let mut posts: Vec<_> = posts_for(state, artist_id)
        .into_iter()
        .filter(|p| p.status != PostStatus::Posted)
        .collect();
    posts.sort_by_key(|p| date_key(&p.date));
    posts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Artist, ExternalShow, Platform};
    use crate::store::Action;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn show(artist: &str, venue: &str, date: &str) -> Show {
        let mut show = Show::new(artist, venue);
        show.date = date.to_string();
        show
    }

    fn external(id: &str, venue: &str, date: &str) -> ExternalShow {
        let mut show = ExternalShow::for_remote_id(id);
        show.venue = venue.to_string();
        show.date = date.to_string();
        show
    }

    fn fixture() -> DashboardState {
        let cyril = Artist {
            id: "cyril".into(),
            ..Artist::new("CYRIL", "#FF6B35")
        };

        let mut released = Release::new("cyril", "Think About Us (CYRIL Remix)");
        released.status = ReleaseStatus::Released;
        released.date = "2025-02-07".into();
        let mut in_progress = Release::new("cyril", "New Single");
        in_progress.status = ReleaseStatus::InProgress;
        in_progress.date = "2025-03-21".into();

        let mut posted = SocialPost::new("cyril", Platform::Instagram);
        posted.status = PostStatus::Posted;
        let draft = SocialPost::new("cyril", Platform::TikTok);

        DashboardState::default()
            .apply(Action::AddArtist(cyril))
            .apply(Action::AddRelease(released))
            .apply(Action::AddRelease(in_progress))
            .apply(Action::AddRelease(Release::new("someone-else", "Other")))
            .apply(Action::AddShow(show("cyril", "WOMB", "2025-03-08")))
            .apply(Action::AddShow(show("cyril", "The Ivy", "2025-02-22")))
            .apply(Action::AddShow(show("cyril", "Old Club", "2025-01-10")))
            .apply(Action::AddShow(show("someone-else", "Elsewhere", "2025-03-01")))
            .apply(Action::AddPost(posted))
            .apply(Action::AddPost(draft))
            .apply(Action::SetExternalShows(vec![
                external("1", "Marquee", "2025-03-01"),
                external("2", "TBA", ""),
            ]))
    }

    #[test]
    fn test_all_shows_lists_manual_then_external() {
        let state = fixture();
        let shows = all_shows(&state, "cyril");
        assert_eq!(shows.len(), 5);
        assert!(matches!(shows[0], ShowRef::Manual(_)));
        assert!(matches!(shows[4], ShowRef::External(_)));
    }

    #[test]
    fn test_agenda_orders_and_splits() {
        let state = fixture();
        let agenda = agenda(&state, "cyril", d(2025, 2, 20));

        let upcoming: Vec<_> = agenda.upcoming.iter().map(|s| s.venue()).collect();
        assert_eq!(upcoming, vec!["The Ivy", "Marquee", "WOMB"]);

        let past: Vec<_> = agenda.past.iter().map(|s| s.venue()).collect();
        assert_eq!(past, vec!["Old Club"]);
    }

    #[test]
    fn test_summary_counts() {
        let state = fixture();
        let summary = DashboardSummary::compute(&state, "cyril", d(2025, 2, 20));

        assert_eq!(
            summary,
            DashboardSummary {
                releases: 2,
                upcoming_releases: 1,
                shows: 5,
                upcoming_shows: 3,
                external_shows: 2,
                posts: 2,
                pending_posts: 1,
            }
        );
    }

    #[test]
    fn test_countdown_label() {
        assert_eq!(countdown_label(0).as_deref(), Some("TODAY"));
        assert_eq!(countdown_label(1).as_deref(), Some("TOMORROW"));
        assert_eq!(countdown_label(14).as_deref(), Some("14 days away"));
        assert_eq!(countdown_label(15), None);
        assert_eq!(countdown_label(-1), None);
    }
}
