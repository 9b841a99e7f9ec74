//! Subcommand handlers
//!
//! Each handler works on an open [`Session`] and writes human-readable output
//! to `out`. Persistence problems never fail a command; sync failures do.

use std::io::Write;

use anyhow::{anyhow, bail, Result};
use backstage_common::model::{
    Artist, PostPatch, Release, Show, ShowRef, ShowSource, SocialPost,
};
use backstage_common::persistence::KeyValueStore;
use backstage_common::sync::EventSource;
use backstage_common::time::days_until;
use backstage_common::views::{self, DashboardSummary};
use backstage_common::{
    Action, ConnectionDetails, DashboardState, Error, Session, SyncOutcome, SyncTrigger,
};
use chrono::NaiveDate;

use crate::cli::{
    ArtistCommand, Command, ConnectArgs, PostArgs, PostCommand, ReleaseArgs, ReleaseCommand,
    ShowArgs, ShowCommand,
};

/// Placeholder for an empty date column
const NO_DATE: &str = "TBA";

pub async fn run<K, S, W>(
    session: &Session<K, S>,
    command: Command,
    today: NaiveDate,
    out: &mut W,
) -> Result<()>
where
    K: KeyValueStore,
    S: EventSource,
    W: Write,
{
    match command {
        Command::Artist(ArtistCommand::Add { name, color }) => {
            add_artist(session, name, color, out).await
        }
        Command::Artist(ArtistCommand::List) => list_artists(session, out).await,
        Command::Release(ReleaseCommand::Add(args)) => add_release(session, args, out).await,
        Command::Release(ReleaseCommand::List { artist }) => {
            list_releases(session, &artist, out).await
        }
        Command::Show(ShowCommand::Add(args)) => add_show(session, args, out).await,
        Command::Show(ShowCommand::List { artist, sync }) => {
            list_shows(session, &artist, sync, today, out).await
        }
        Command::Post(PostCommand::Add(args)) => add_post(session, args, out).await,
        Command::Post(PostCommand::List { artist }) => list_posts(session, &artist, out).await,
        Command::Post(PostCommand::Cycle { id }) => cycle_post(session, &id, out).await,
        Command::Connect(args) => connect(session, args, out).await,
        Command::Disconnect => {
            session.disconnect().await;
            writeln!(out, "Disconnected from the booking API")?;
            Ok(())
        }
        Command::Sync => sync(session, out).await,
        Command::Summary { artist, json } => summary(session, &artist, json, today, out).await,
    }
}

/// Look up an artist by id, or by name ignoring case
fn resolve_artist(state: &DashboardState, key: &str) -> Result<Artist> {
    state
        .artist(key)
        .or_else(|| {
            state
                .artists
                .iter()
                .find(|a| a.name.eq_ignore_ascii_case(key))
        })
        .cloned()
        .ok_or_else(|| Error::NotFound(format!("artist '{}'", key)).into())
}

fn required(value: String, what: &str) -> Result<String> {
    let value = value.trim().to_string();
    if value.is_empty() {
        bail!("{} is required", what);
    }
    Ok(value)
}

fn or_tba(date: &str) -> &str {
    if date.is_empty() {
        NO_DATE
    } else {
        date
    }
}

// =============================================================================
// Artists
// =============================================================================

async fn add_artist<K, S, W>(
    session: &Session<K, S>,
    name: String,
    color: String,
    out: &mut W,
) -> Result<()>
where
    K: KeyValueStore,
    S: EventSource,
    W: Write,
{
    let artist = Artist::new(required(name, "Artist name")?, color);
    writeln!(out, "Added artist {} ({})", artist.name, artist.id)?;
    session.dispatch(Action::AddArtist(artist)).await;
    Ok(())
}

async fn list_artists<K, S, W>(session: &Session<K, S>, out: &mut W) -> Result<()>
where
    K: KeyValueStore,
    S: EventSource,
    W: Write,
{
    let state = session.state().await;
    if state.artists.is_empty() {
        writeln!(out, "No artists yet")?;
    }
    for artist in &state.artists {
        writeln!(out, "[{}] {}  {}  {}", artist.avatar, artist.name, artist.color, artist.id)?;
    }
    Ok(())
}

// =============================================================================
// Releases
// =============================================================================

async fn add_release<K, S, W>(session: &Session<K, S>, args: ReleaseArgs, out: &mut W) -> Result<()>
where
    K: KeyValueStore,
    S: EventSource,
    W: Write,
{
    let artist = resolve_artist(&session.state().await, &args.artist)?;
    let release = Release {
        release_type: args.release_type,
        status: args.status,
        date: args.date.unwrap_or_default(),
        label: args.label.unwrap_or_default(),
        notes: args.notes.unwrap_or_default(),
        ..Release::new(&artist.id, required(args.title, "Title")?)
    };

    writeln!(out, "Added {} \"{}\" for {}", release.release_type, release.title, artist.name)?;
    session.dispatch(Action::AddRelease(release)).await;
    Ok(())
}

async fn list_releases<K, S, W>(session: &Session<K, S>, artist: &str, out: &mut W) -> Result<()>
where
    K: KeyValueStore,
    S: EventSource,
    W: Write,
{
    let state = session.state().await;
    let artist = resolve_artist(&state, artist)?;
    let releases = views::releases_for(&state, &artist.id);
    if releases.is_empty() {
        writeln!(out, "No releases for {}", artist.name)?;
    }
    for r in releases {
        write!(out, "{:<10}  {}  [{}]  {}", or_tba(&r.date), r.title, r.release_type, r.status)?;
        if !r.label.is_empty() {
            write!(out, "  {}", r.label)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

// =============================================================================
// Shows
// =============================================================================

async fn add_show<K, S, W>(session: &Session<K, S>, args: ShowArgs, out: &mut W) -> Result<()>
where
    K: KeyValueStore,
    S: EventSource,
    W: Write,
{
    let artist = resolve_artist(&session.state().await, &args.artist)?;
    let show = Show {
        city: args.city.unwrap_or_default(),
        country: args.country.unwrap_or_default(),
        date: args.date.unwrap_or_default(),
        fee: args.fee.unwrap_or_default(),
        status: args.status,
        notes: args.notes.unwrap_or_default(),
        ..Show::new(&artist.id, required(args.venue, "Venue")?)
    };

    writeln!(out, "Added show at {} for {}", show.venue, artist.name)?;
    session.dispatch(Action::AddShow(show)).await;
    Ok(())
}

fn show_line(show: &ShowRef<'_>, today: NaiveDate) -> String {
    let mut line = format!("{:<10}  {}", or_tba(show.date()), show.venue());
    let place: Vec<&str> = [show.city(), show.country()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if !place.is_empty() {
        line.push_str(&format!(", {}", place.join(", ")));
    }
    if !show.status().is_empty() {
        line.push_str(&format!("  {}", show.status()));
    }
    if show.source() == ShowSource::External {
        line.push_str("  [ABOSS]");
    }
    if let Some(label) = days_until(show.date(), today).and_then(views::countdown_label) {
        line.push_str(&format!("  ({})", label));
    }
    line
}

async fn list_shows<K, S, W>(
    session: &Session<K, S>,
    artist: &str,
    refresh: bool,
    today: NaiveDate,
    out: &mut W,
) -> Result<()>
where
    K: KeyValueStore,
    S: EventSource,
    W: Write,
{
    if refresh {
        // A failed refresh still lists what we have
        if session.sync(SyncTrigger::Implicit).await.is_err() {
            if let Some(message) = session.sync_error().await {
                writeln!(out, "warning: {}", message)?;
            }
        }
    }

    let state = session.state().await;
    let artist = resolve_artist(&state, artist)?;
    let agenda = views::agenda(&state, &artist.id, today);

    writeln!(out, "Upcoming ({})", agenda.upcoming.len())?;
    for show in &agenda.upcoming {
        writeln!(out, "  {}", show_line(show, today))?;
    }
    writeln!(out, "Past ({})", agenda.past.len())?;
    for show in &agenda.past {
        writeln!(out, "  {}", show_line(show, today))?;
    }
    Ok(())
}

// =============================================================================
// Posts
// =============================================================================

async fn add_post<K, S, W>(session: &Session<K, S>, args: PostArgs, out: &mut W) -> Result<()>
where
    K: KeyValueStore,
    S: EventSource,
    W: Write,
{
    let artist = resolve_artist(&session.state().await, &args.artist)?;
    let post = SocialPost {
        content_type: required(args.content_type, "Content type")?,
        date: args.date.unwrap_or_default(),
        caption: args.caption.unwrap_or_default(),
        status: args.status,
        ..SocialPost::new(&artist.id, args.platform)
    };

    writeln!(out, "Added {} {} for {} ({})", post.platform, post.content_type, artist.name, post.id)?;
    session.dispatch(Action::AddPost(post)).await;
    Ok(())
}

async fn list_posts<K, S, W>(session: &Session<K, S>, artist: &str, out: &mut W) -> Result<()>
where
    K: KeyValueStore,
    S: EventSource,
    W: Write,
{
    let state = session.state().await;
    let artist = resolve_artist(&state, artist)?;
    let posts = views::posts_for(&state, &artist.id);
    if posts.is_empty() {
        writeln!(out, "No posts for {}", artist.name)?;
    }
    for p in posts {
        writeln!(
            out,
            "{:<10}  {:<9}  {} {}  {}  {}",
            or_tba(&p.date),
            p.status.as_str(),
            p.platform,
            p.content_type,
            p.caption,
            p.id
        )?;
    }
    Ok(())
}

async fn cycle_post<K, S, W>(session: &Session<K, S>, id: &str, out: &mut W) -> Result<()>
where
    K: KeyValueStore,
    S: EventSource,
    W: Write,
{
    let current = session
        .state()
        .await
        .post(id)
        .map(|p| p.status)
        .ok_or_else(|| Error::NotFound(format!("post '{}'", id)))?;
    let next = current.next();

    session
        .dispatch(Action::UpdatePost {
            id: id.to_string(),
            patch: PostPatch::status(next),
        })
        .await;
    writeln!(out, "{}: {} -> {}", id, current, next)?;
    Ok(())
}

// =============================================================================
// Integration
// =============================================================================

async fn connect<K, S, W>(session: &Session<K, S>, args: ConnectArgs, out: &mut W) -> Result<()>
where
    K: KeyValueStore,
    S: EventSource,
    W: Write,
{
    let details = ConnectionDetails {
        token: required(args.token, "Token")?,
        project_id: required(args.project_id, "Project id")?,
        account_type: args.account_type,
        agency_id: args.agency_id.unwrap_or_default().trim().to_string(),
    };
    session.configure_integration(details).await;

    writeln!(out, "Connection details saved. Run `backstage sync` to pull shows.")?;
    Ok(())
}

async fn sync<K, S, W>(session: &Session<K, S>, out: &mut W) -> Result<()>
where
    K: KeyValueStore,
    S: EventSource,
    W: Write,
{
    match session.sync(SyncTrigger::Explicit).await {
        Ok(SyncOutcome::Synced { shows }) => {
            writeln!(out, "Synced {} shows from ABOSS", shows)?;
            Ok(())
        }
        Ok(SyncOutcome::Skipped) => {
            writeln!(out, "Nothing to sync")?;
            Ok(())
        }
        Err(e) => {
            let message = session.sync_error().await.unwrap_or_else(|| e.to_string());
            Err(anyhow!(message))
        }
    }
}

async fn summary<K, S, W>(
    session: &Session<K, S>,
    artist: &str,
    json: bool,
    today: NaiveDate,
    out: &mut W,
) -> Result<()>
where
    K: KeyValueStore,
    S: EventSource,
    W: Write,
{
    let state = session.state().await;
    let artist = resolve_artist(&state, artist)?;
    let summary = DashboardSummary::compute(&state, &artist.id, today);

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
        return Ok(());
    }

    let integration = session.settings().await.integration;
    writeln!(out, "{}", artist.name)?;
    writeln!(out, "  Releases  {:>3}  ({} upcoming)", summary.releases, summary.upcoming_releases)?;
    if integration.connected {
        writeln!(out, "  Shows     {:>3}  ({} from ABOSS)", summary.shows, summary.external_shows)?;
    } else {
        writeln!(out, "  Shows     {:>3}  ({} upcoming)", summary.shows, summary.upcoming_shows)?;
    }
    writeln!(out, "  Content   {:>3}  ({} pending)", summary.posts, summary.pending_posts)?;

    let upcoming = views::upcoming_releases(&state, &artist.id);
    if !upcoming.is_empty() {
        writeln!(out, "Next releases")?;
        for r in upcoming {
            writeln!(out, "  {:<10}  {}  [{}]", or_tba(&r.date), r.title, r.release_type)?;
        }
    }

    let pending = views::pending_posts(&state, &artist.id);
    if !pending.is_empty() {
        writeln!(out, "Pending posts")?;
        for p in pending {
            writeln!(out, "  {:<10}  {} {}  {}", or_tba(&p.date), p.platform, p.content_type, p.status)?;
        }
    }

    match integration.last_sync {
        Some(at) => writeln!(out, "Last sync: {}", at.format("%Y-%m-%d %H:%M UTC"))?,
        None => writeln!(out, "Booking API: not connected")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use backstage_common::model::{ExternalShow, IntegrationSettings, PostStatus};
    use backstage_common::persistence::MemoryStore;
    use backstage_common::sync::SyncError;
    use clap::Parser;
    use std::sync::{Arc, Mutex};

    /// Source returning one canned result per call
    struct CannedSource(Mutex<Vec<Result<Vec<ExternalShow>, SyncError>>>);

    #[async_trait::async_trait]
    impl EventSource for CannedSource {
        async fn fetch_shows(
            &self,
            _settings: &IntegrationSettings,
        ) -> Result<Vec<ExternalShow>, SyncError> {
            self.0.lock().unwrap().pop().unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    type TestSession = Session<Arc<MemoryStore>, CannedSource>;

    async fn session(results: Vec<Result<Vec<ExternalShow>, SyncError>>) -> TestSession {
        Session::open(Arc::new(MemoryStore::new()), CannedSource(Mutex::new(results))).await
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 20).unwrap()
    }

    /// Run one command line and return its output
    async fn exec(session: &TestSession, args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("backstage").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        run(session, cli.command, today(), &mut out).await?;
        Ok(String::from_utf8(out)?)
    }

    #[tokio::test]
    async fn test_artist_add_and_list() {
        let session = session(vec![]).await;
        exec(&session, &["artist", "add", "cyril"]).await.unwrap();

        let listed = exec(&session, &["artist", "list"]).await.unwrap();
        assert!(listed.starts_with("[C] cyril  #FF6B35"), "{}", listed);
    }

    #[tokio::test]
    async fn test_blank_artist_name_is_rejected() {
        let session = session(vec![]).await;
        assert!(exec(&session, &["artist", "add", "  "]).await.is_err());
        assert!(session.state().await.artists.is_empty());
    }

    #[tokio::test]
    async fn test_records_need_a_known_artist() {
        let session = session(vec![]).await;
        let err = exec(&session, &["release", "add", "-a", "nobody", "Song"])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("nobody"));
        assert!(session.state().await.releases.is_empty());
    }

    #[tokio::test]
    async fn test_artist_resolved_by_name() {
        let session = session(vec![]).await;
        exec(&session, &["artist", "add", "CYRIL"]).await.unwrap();
        exec(&session, &["release", "add", "-a", "cyril", "New Single", "--date", "2025-03-21"])
            .await
            .unwrap();

        let state = session.state().await;
        assert_eq!(state.releases.len(), 1);
        assert_eq!(state.releases[0].artist_id, state.artists[0].id);
        assert_eq!(state.releases[0].date, "2025-03-21");
    }

    #[tokio::test]
    async fn test_post_cycle() {
        let session = session(vec![]).await;
        exec(&session, &["artist", "add", "cyril"]).await.unwrap();
        exec(&session, &["post", "add", "-a", "cyril", "-p", "instagram"])
            .await
            .unwrap();
        let id = session.state().await.social_posts[0].id.clone();

        let out = exec(&session, &["post", "cycle", &id]).await.unwrap();
        assert_eq!(out.trim(), format!("{}: draft -> scheduled", id));

        exec(&session, &["post", "cycle", &id]).await.unwrap();
        exec(&session, &["post", "cycle", &id]).await.unwrap();
        assert_eq!(session.state().await.social_posts[0].status, PostStatus::Draft);

        assert!(exec(&session, &["post", "cycle", "missing"]).await.is_err());
    }

    #[tokio::test]
    async fn test_show_list_marks_external_and_countdown() {
        let mut external = ExternalShow::for_remote_id("1");
        external.venue = "Marquee".into();
        external.date = "2025-02-21".into();

        let session = session(vec![Ok(vec![external])]).await;
        exec(&session, &["artist", "add", "cyril"]).await.unwrap();
        exec(&session, &["show", "add", "-a", "cyril", "WOMB", "--city", "Tokyo", "--date", "2025-03-08"])
            .await
            .unwrap();
        exec(&session, &["connect", "--token", "t", "--project-id", "99"])
            .await
            .unwrap();
        exec(&session, &["sync"]).await.unwrap();

        let out = exec(&session, &["show", "list", "-a", "cyril"]).await.unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Upcoming (2)");
        assert!(lines[1].contains("Marquee") && lines[1].contains("[ABOSS]") && lines[1].contains("(TOMORROW)"));
        assert!(lines[2].contains("WOMB, Tokyo"));
        assert!(!lines[2].contains("days away"));
        assert_eq!(lines[3], "Past (0)");
    }

    #[tokio::test]
    async fn test_sync_failure_reports_error_slot() {
        let session = session(vec![Err(SyncError::Rejected {
            status: 401,
            message: "ABOSS returned 401".into(),
        })])
        .await;
        exec(&session, &["connect", "--token", "t", "--project-id", "99"])
            .await
            .unwrap();

        let err = exec(&session, &["sync"]).await.unwrap_err();
        assert_eq!(err.to_string(), "Connection failed: ABOSS returned 401");
        assert!(!session.settings().await.integration.connected);
    }

    #[tokio::test]
    async fn test_sync_without_connection_fails() {
        let session = session(vec![]).await;
        let err = exec(&session, &["sync"]).await.unwrap_err();
        assert_eq!(err.to_string(), SyncError::NotConfigured.to_string());
    }

    #[tokio::test]
    async fn test_summary_json() {
        let session = session(vec![]).await;
        exec(&session, &["artist", "add", "cyril"]).await.unwrap();
        exec(&session, &["post", "add", "-a", "cyril", "-p", "TikTok"])
            .await
            .unwrap();

        let out = exec(&session, &["summary", "-a", "cyril", "--json"]).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["posts"], 1);
        assert_eq!(value["pendingPosts"], 1);
        assert_eq!(value["externalShows"], 0);
    }

    #[tokio::test]
    async fn test_disconnect() {
        let session = session(vec![]).await;
        exec(&session, &["connect", "--token", "t", "--project-id", "99"])
            .await
            .unwrap();
        exec(&session, &["disconnect"]).await.unwrap();
        assert_eq!(session.settings().await.integration, IntegrationSettings::default());
    }
}
