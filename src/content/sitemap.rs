use crate::{content::Post, utils::escape_html};

/// Routes listed in the sitemap besides the blog posts.
pub const STATIC_ROUTES: [&str; 2] = ["", "spotify"];

/// Every URL the sitemap advertises: the static routes, then one per post.
pub fn sitemap_urls(site_url: &str, posts: &[Post]) -> Vec<String> {
    let site_url = site_url.trim_end_matches('/');

    STATIC_ROUTES
        .iter()
        .map(|route| format!("{site_url}/{route}"))
        .chain(posts.iter().map(|post| format!("{site_url}/blog/{}", post.slug)))
        .collect()
}

pub fn render_sitemap(site_url: &str, posts: &[Post]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for url in sitemap_urls(site_url, posts) {
        xml.push_str(&format!("<url><loc>{}</loc></url>\n", escape_html(&url)));
    }

    xml.push_str("</urlset>\n");
    xml
}
