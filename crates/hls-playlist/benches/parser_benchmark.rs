use std::fmt::Write;
use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use hls_playlist::{AttributeList, MediaPlaylistParser, parse_media_playlist};

const PLAYLIST_URL: &str = "https://example.com/live/index.m3u8";

fn benchmark_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("Media Playlist");

    let playlist = create_media_playlist(4000);
    group.throughput(Throughput::Bytes(playlist.len() as u64));

    group.bench_function("parse_media_playlist", |b| {
        b.iter(|| parse_media_playlist(black_box(PLAYLIST_URL), black_box(&playlist)).unwrap())
    });

    let parser = MediaPlaylistParser::default();
    group.bench_function("MediaPlaylistParser::parse", |b| {
        b.iter(|| {
            parser
                .parse(black_box(PLAYLIST_URL), black_box(&playlist))
                .unwrap()
        })
    });

    group.finish();
}

fn benchmark_attributes(c: &mut Criterion) {
    let input = "METHOD=AES-128,URI=\"https://priv.example.com/key.php?r=2680,a=1\",IV=0x1566B,KEYFORMAT=\"identity\"";
    c.bench_function("AttributeList::parse", |b| {
        b.iter(|| AttributeList::parse(black_box(input)).unwrap())
    });
}

criterion_group!(benches, benchmark_parser, benchmark_attributes);
criterion_main!(benches);

fn create_media_playlist(segment_count: usize) -> String {
    let mut playlist = String::from(
        "#EXTM3U\n#EXT-X-VERSION:4\n#EXT-X-TARGETDURATION:2\n#EXT-X-MEDIA-SEQUENCE:826176645\n",
    );

    for i in 0..segment_count {
        if i == 0 {
            playlist.push_str("#EXT-X-PROGRAM-DATE-TIME:2020-04-07T11:32:38Z\n");
        }
        if i % 100 == 0 {
            let _ = writeln!(
                playlist,
                "#EXT-X-KEY:METHOD=AES-128,URI=\"https://keys.example.com/key?id={}\"",
                i / 100
            );
        }
        if i % 500 == 499 {
            playlist.push_str("#EXT-X-DISCONTINUITY\n");
        }
        let _ = writeln!(playlist, "#EXTINF:1.92,\n#EXT-X-BYTERANGE:188000");
        let _ = writeln!(playlist, "avc_video=3000000-{}.ts?variant=italy", 826176659 + i);
    }

    playlist.push_str("#EXT-X-ENDLIST\n");
    playlist
}
