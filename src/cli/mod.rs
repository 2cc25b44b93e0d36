use clap::{Parser, Subcommand};
use std::{path::PathBuf, thread, time::Duration};

use crate::api::MockApi;
use crate::catalog::format::FormattedTrack;
use crate::config;
use crate::domain::id::EntryId;
use crate::player::audio::NullAudio;
use crate::player::controller::Player;
use crate::player::view::{PlayerView, Region};

#[derive(Parser)]
#[command(name = "mysic")]
#[command(version = "0.1")]
#[command(about = "Local music catalog and player")]
pub struct Cli {
    /// Path to the config TOML file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search tracks by title, artist, or genre
    Search {
        query: String,
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// Show a shuffled selection of trending tracks
    Featured {
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// List playlists
    Playlists,
    /// List the tracks of one playlist
    Tracks {
        /// Playlist id
        playlist: String,
    },
    /// List recommended artists
    Artists,
    /// Run the transport in the terminal (simulated playback)
    Play {
        /// Search query selecting the track list; all tracks when omitted
        #[arg(short, long)]
        query: Option<String>,
        /// One-second ticks to run before exiting
        #[arg(short, long, default_value_t = 10)]
        ticks: u32,
    },
}

/// Entrypoint for CLI
pub fn run() {
    env_logger::init();
    let cli = Cli::parse();

    let cfg = config::Config::load(cli.config.to_str().unwrap()).unwrap();
    let mut api = MockApi::from_config(&cfg);

    if !api.initialize() {
        println!("Warning: catalog could not be loaded, queries will come back empty");
    }

    match &cli.command {
        Commands::Search { query, limit } => {
            let response = api.search_tracks(query, *limit);
            if let Some(error) = response.error {
                println!("Search failed: {error}");
                return;
            }
            print_tracks(&response.tracks);
        }

        Commands::Featured { limit } => {
            let response = api.hot_tracks(*limit);
            if let Some(error) = response.error {
                println!("Could not fetch featured tracks: {error}");
                return;
            }
            print_tracks(&response.tracks);
        }

        Commands::Playlists => {
            let response = api.user_playlists();
            if let Some(error) = response.error {
                println!("Could not fetch playlists: {error}");
                return;
            }
            for playlist in &response.playlists {
                println!(
                    "{}  {} ({} tracks) - {}",
                    playlist.id, playlist.name, playlist.track_count, playlist.owner
                );
            }
        }

        Commands::Tracks { playlist } => {
            let response = api.playlist_tracks(&EntryId::from(playlist.as_str()));
            match (response.playlist, response.error) {
                (Some(header), _) => {
                    println!("Playlist: {} - {}", header.name, header.description);
                    print_tracks(&response.tracks);
                }
                (None, error) => {
                    println!("{}", error.unwrap_or_else(|| "playlist not found".to_string()));
                }
            }
        }

        Commands::Artists => {
            let response = api.artist_recommendations();
            if let Some(error) = response.error {
                println!("Could not fetch artists: {error}");
                return;
            }
            for artist in &response.artists {
                println!(
                    "{}  {} [{}] - {} followers",
                    artist.id, artist.name, artist.genre, artist.followers
                );
            }
        }

        Commands::Play { query, ticks } => {
            let response = api.search_tracks(query.as_deref().unwrap_or(""), 100);
            if let Some(error) = response.error {
                println!("Could not build a track list: {error}");
                return;
            }

            let mut player = Player::new(
                Box::new(NullAudio),
                Box::new(TerminalView),
                &cfg.player,
            );
            player.set_track_list(response.tracks);
            player.play();

            for _ in 0..*ticks {
                thread::sleep(Duration::from_secs(1));
                player.tick();
            }
            player.pause();
        }
    }
}

fn print_tracks(tracks: &[FormattedTrack]) {
    if tracks.is_empty() {
        println!("No tracks found.");
        return;
    }
    for track in tracks {
        println!(
            "{}  {} - {} ({}) [{}] {} plays",
            track.display_id, track.title, track.artist, track.duration, track.genre, track.play_count
        );
    }
}

/// Terminal rendering of the player view: every region is a printed
/// line, and all of them are always bound.
struct TerminalView;

impl PlayerView for TerminalView {
    fn missing_regions(&self) -> Vec<Region> {
        vec![]
    }

    fn render_playlist(&mut self, tracks: &[FormattedTrack]) {
        println!("Playlist ({} tracks):", tracks.len());
        for (i, track) in tracks.iter().enumerate() {
            println!("  {}. {} - {}", i + 1, track.title, track.artist);
        }
    }

    fn show_empty_message(&mut self) {
        println!("No tracks found.");
    }

    fn show_track(&mut self, track: &FormattedTrack) {
        println!("Loaded: {} - {}", track.title, track.artist);
    }

    fn show_demo_notice(&mut self, track: &FormattedTrack) {
        println!("{} (Demo) - no audio source, playback is simulated", track.title);
    }

    fn set_transport_enabled(&mut self, enabled: bool) {
        if !enabled {
            println!("Transport disabled for this track");
        }
    }

    fn set_playing(&mut self, playing: bool) {
        println!("{}", if playing { "Playing" } else { "Paused" });
    }

    fn set_progress(&mut self, _fraction: f64, position: &str, total: &str) {
        println!("  {position} / {total}");
    }

    fn highlight(&mut self, index: usize) {
        println!("Current track: #{}", index + 1);
    }
}
