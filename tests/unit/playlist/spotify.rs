use super::*;

const PAGE: &str = r#"{
  "items": [
    { "track": {
        "name": "Paint It Black",
        "album": { "release_date": "1966-05-07" },
        "external_urls": { "spotify": "https://open.spotify.com/track/1" },
        "artists": [ { "name": "The Rolling Stones" } ] } },
    { "track": null },
    { "track": {
        "name": "Under Pressure",
        "album": { "release_date": "1981" },
        "external_urls": { "spotify": "https://open.spotify.com/track/2" },
        "artists": [ { "name": "Queen" }, { "name": "David Bowie" } ] } }
  ],
  "next": "https://api.spotify.com/v1/playlists/x/tracks?offset=100"
}"#;

#[test]
fn maps_page_items_to_tracks() {
    let page = SpotifyPage::from_reader(PAGE.as_bytes()).unwrap();
    assert_eq!(page.playlist_name, None);
    assert_eq!(page.skipped, 1);
    assert!(page.next.as_deref().unwrap().contains("offset=100"));

    assert_eq!(page.tracks.len(), 2);
    assert_eq!(page.tracks[0].year(), "1966");
    assert_eq!(page.tracks[0].url(), "https://open.spotify.com/track/1");
    assert_eq!(page.tracks[1].artists(), "Queen, David Bowie");
    assert_eq!(page.tracks[1].year(), "1981");
}

#[test]
fn full_playlist_object_carries_name() {
    let json = format!(r#"{{ "name": "Party", "tracks": {PAGE} }}"#);
    let page = SpotifyPage::from_reader(json.as_bytes()).unwrap();
    assert_eq!(page.playlist_name.as_deref(), Some("Party"));
    assert_eq!(page.tracks.len(), 2);
}

#[test]
fn short_release_date_is_rejected_with_item_index() {
    let json = r#"{ "items": [ { "track": {
        "name": "Odd",
        "album": { "release_date": "" },
        "external_urls": { "spotify": "https://x" },
        "artists": [ { "name": "A" } ] } } ] }"#;
    let err = SpotifyPage::from_reader(json.as_bytes()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("item 0"), "{msg}");
    assert!(msg.contains("four digits"), "{msg}");
}

#[test]
fn missing_url_is_rejected() {
    let json = r#"{ "items": [ { "track": {
        "name": "Local",
        "album": { "release_date": "2004" },
        "external_urls": {},
        "artists": [ { "name": "A" } ] } } ] }"#;
    let err = SpotifyPage::from_reader(json.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("no Spotify URL"));
}
