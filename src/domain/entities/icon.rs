//! Fixed icon set for links.

/// Icon keys a link may reference. Anything else is rejected on write.
pub const LINK_ICONS: &[&str] = &[
    "website",
    "shop",
    "email",
    "instagram",
    "tiktok",
    "youtube",
    "twitter",
    "facebook",
    "linkedin",
    "github",
    "twitch",
    "spotify",
    "podcast",
    "music",
    "calendar",
    "coupon",
];

/// Returns true if `key` belongs to the icon set.
pub fn is_known_icon(key: &str) -> bool {
    LINK_ICONS.contains(&key)
}
