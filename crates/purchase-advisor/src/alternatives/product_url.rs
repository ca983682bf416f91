//! Checks and cleanup for retailer links suggested by a search backend.

use url::Url;

/// Path or query fragments that mark a single product page.
const PRODUCT_MARKERS: &[&str] = &[
    "/p/",
    "/product/",
    "/item/",
    "/dp/",
    "/shop/",
    "/buy/",
    "/ip/",
    "pid=",
    "product_id=",
    "productid=",
    "itemid=",
    "skuid=",
];

const SHOPPING_DOMAINS: &[&str] = &[
    "amazon",
    "walmart",
    "target",
    "bestbuy",
    "ebay",
    "etsy",
    "homedepot",
    "lowes",
    "wayfair",
    "newegg",
    "overstock",
    "costco",
    "samsclub",
    "macys",
    "nordstrom",
    "kohls",
];

/// Query keys that must match exactly; they are too short to match by containment.
const EXACT_QUERY_KEYS: &[&str] = &["id", "p"];

/// Query keys kept when contained in a parameter name.
const CONTAINED_QUERY_KEYS: &[&str] = &["pid", "product", "item", "sku"];

pub const FALLBACK_RETAILER: &str = "Online Retailer";

/// True for links on a known shopping domain that point at a product rather than a listing.
pub fn is_product_url(raw: &str) -> bool {
    let Ok(url) = Url::parse(raw.trim()) else {
        return false;
    };
    let Some(host) = url.host_str() else {
        return false;
    };

    let host = host.to_lowercase();
    if !SHOPPING_DOMAINS.iter().any(|domain| host.contains(domain)) {
        return false;
    }

    let path = url.path().to_lowercase();
    let query = url.query().unwrap_or_default().to_lowercase();
    let has_marker = PRODUCT_MARKERS
        .iter()
        .any(|marker| path.contains(marker) || query.contains(marker));
    let is_listing = path.contains("search") || path.contains("list");

    has_marker || !is_listing
}

/// Normalize a suggested link: force a scheme, keep only product-identifying query
/// parameters and drop the fragment. Unparseable input comes back with just the scheme fix.
pub fn ensure_valid_product_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let Ok(mut url) = Url::parse(&with_scheme) else {
        return with_scheme;
    };

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| is_identifying_key(key))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }
    url.set_fragment(None);
    url.to_string()
}

fn is_identifying_key(key: &str) -> bool {
    let key = key.to_lowercase();
    EXACT_QUERY_KEYS.contains(&key.as_str())
        || CONTAINED_QUERY_KEYS
            .iter()
            .any(|fragment| key.contains(fragment))
}

/// Retailer name guessed from the host, e.g. `www.bestbuy.com` becomes `Bestbuy`.
pub fn retailer_from_url(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    let host = url.host_str()?;
    let label = host.strip_prefix("www.").unwrap_or(host).split('.').next()?;

    let mut chars = label.chars();
    let first = chars.next()?;
    Some(
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    )
}
