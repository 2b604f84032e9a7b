//! Identity page served at `GET /who`

use serde::Serialize;

/// Who the server thinks is asking, as reported by its `/who` page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhoIs {
    pub login_name: String,
    /// Machine name; the server stores it as the author of new posts.
    pub node_name: String,
    pub remote_addr: String,
}

impl WhoIs {
    /// Reads the `You are <b>login</b> from <b>node</b> (addr)` line out of
    /// the page. Returns `None` when the page has a different shape.
    pub fn from_html(html: &str) -> Option<Self> {
        let rest = after(html, "You are <b>")?;
        let (login, rest) = rest.split_once("</b>")?;
        let rest = after(rest, " from <b>")?;
        let (node, rest) = rest.split_once("</b>")?;
        let rest = after(rest, " (")?;
        let (addr, _) = rest.split_once(')')?;

        Some(Self {
            login_name: html_escape::decode_html_entities(login).into_owned(),
            node_name: html_escape::decode_html_entities(node).into_owned(),
            remote_addr: addr.trim().to_string(),
        })
    }
}

fn after<'a>(haystack: &'a str, marker: &str) -> Option<&'a str> {
    haystack
        .find(marker)
        .map(|index| &haystack[index + marker.len()..])
}
