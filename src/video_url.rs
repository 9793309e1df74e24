use url::Url;

// @module: YouTube URL to video id extraction

/// Extract the video id from a YouTube URL.
///
/// Handles `youtu.be/<id>`, `youtube.com/watch?v=<id>` and
/// `youtube.com/shorts/<id>` forms. Anything that does not parse as a
/// URL, or parses but is not a recognized YouTube shape, is returned
/// unchanged so bare video ids pass straight through.
pub fn video_id_from_input(input: &str) -> String {
    let Ok(parsed) = Url::parse(input) else {
        return input.to_string();
    };

    let host = parsed.host_str().unwrap_or("").to_lowercase();

    if host == "youtu.be" {
        return parsed.path().trim_start_matches('/').to_string();
    }

    if host.contains("youtube") {
        if parsed.path() == "/watch" {
            return parsed
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned())
                .unwrap_or_default();
        }

        if let Some(rest) = parsed.path().strip_prefix("/shorts/") {
            if let Some(id) = rest.split('/').next() {
                if !id.is_empty() {
                    return id.to_string();
                }
            }
        }
    }

    input.to_string()
}
