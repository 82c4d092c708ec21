//! Playlist generation command

use recograph_core::config::EngineConfig;
use recograph_core::error::Result;
use recograph_core::playlist::{Playlist, PlaylistConstraints, PlaylistService};

use super::dispatch::open_store;
use super::output::print_json;
use crate::cli::{Cli, OutputFormat};

pub fn execute(
    cli: &Cli,
    config: &EngineConfig,
    user: &str,
    constraints: &PlaylistConstraints,
) -> Result<()> {
    let store = open_store(cli)?;
    let playlist = PlaylistService::new(&store, config).generate(user, constraints)?;
    output_playlist(cli, playlist.as_ref())
}

fn output_playlist(cli: &Cli, playlist: Option<&Playlist>) -> Result<()> {
    match cli.format {
        OutputFormat::Json => print_json(&playlist),
        OutputFormat::Human => {
            let Some(playlist) = playlist else {
                if !cli.quiet {
                    eprintln!("no playlist satisfies the constraints");
                }
                return Ok(());
            };
            for (i, song) in playlist.songs.iter().enumerate() {
                let length = song
                    .duration
                    .map(|d| format_seconds(u64::from(d)))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:>3}. {}  {}  {}  {}",
                    i + 1,
                    song.id,
                    song.title,
                    song.artist,
                    length
                );
            }
            println!(
                "{} songs  {}",
                playlist.size,
                format_seconds(playlist.total_duration)
            );
            Ok(())
        }
    }
}

/// `m:ss`
fn format_seconds(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(440), "7:20");
        assert_eq!(format_seconds(59), "0:59");
    }
}
