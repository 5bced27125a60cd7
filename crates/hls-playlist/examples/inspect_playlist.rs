use std::env;
use std::fs;

use hls_playlist::{IvCase, MediaPlaylistParser, ParserConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("Usage: inspect_playlist <playlist.m3u8> [playlist url]");
        std::process::exit(2);
    };
    let base_uri = args.next().unwrap_or_else(|| path.clone());

    let content = fs::read_to_string(&path)?;
    let parser = MediaPlaylistParser::new(ParserConfig::default().with_iv_case(IvCase::Lower));
    let playlist = parser.parse(&base_uri, &content)?;

    println!("Media Playlist: {}", playlist.base_uri);
    println!("====================");
    println!("  Version:          {}", playlist.version);
    println!("  Target duration:  {}s", playlist.target_duration_secs);
    println!("  Media sequence:   {}", playlist.media_sequence);
    println!("  Live:             {}", playlist.live);
    println!("  Segments:         {}", playlist.segments.len());
    println!("  Total duration:   {:.3}s", playlist.total_duration_secs());

    for (index, segment) in playlist.segments.iter().enumerate() {
        let sequence = playlist.segment_media_sequence(index).unwrap_or_default();
        let url = playlist
            .resolve_segment_url(segment)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| segment.url.clone());

        print!(
            "  #{sequence} [{:.3}s, disc {}] {url}",
            segment.duration_secs, segment.discontinuity_sequence_number
        );
        if let Some(range) = segment.byte_range() {
            print!(" bytes {}@{}", range.length, range.offset);
        }
        if let Some(iv) = &segment.encryption_iv {
            print!(" iv {iv}");
        }
        if let Some(date_time) = segment.program_date_time {
            print!(" at {}", date_time.to_rfc3339());
        }
        println!();
    }

    Ok(())
}
