use std::time::Duration;

use anyhow::{anyhow, Result};
use once_cell::sync::OnceCell;
use reqwest::{header, Client, Method, Response};

pub mod element;
pub mod user_agent;

/// A singleton instance of the reqwest client.
///
/// The crawler reuses one client for every page it visits, the analog of a
/// single long lived browser session. Each request targets an absolute URL so
/// nothing carries over from a failed fetch to the next symbol.
static CLIENT: OnceCell<Client> = OnceCell::new();

/// Returns the reqwest client singleton instance or creates one if it doesn't exist.
///
/// The crawl loop initializes it up front: a client that cannot be built
/// fails the whole run instead of failing every symbol in turn.
pub(crate) fn get_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .brotli(true)
            .gzip(true)
            .connect_timeout(Duration::from_secs(8))
            .timeout(Duration::from_secs(15))
            .tcp_nodelay(true)
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(5))
            .referer(true)
            .user_agent(user_agent::gen_random_ua())
            .build()
            .map_err(|e| anyhow!("Failed to create reqwest client: {:?}", e))
    })
}

async fn get_response(url: &str, headers: Option<header::HeaderMap>) -> Result<Response> {
    let client = get_client()?;
    let mut rb = client.request(Method::GET, url);

    if let Some(h) = headers {
        rb = rb.headers(h);
    }

    let res = rb
        .send()
        .await
        .map_err(|e| anyhow!("Failed to GET {} because {:?}", url, e))?;

    Ok(res)
}

/// Performs an HTTP GET request and returns the response as text.
///
/// # Arguments
///
/// * `url`: The URL to send the GET request to.
///
/// # Returns
///
/// * `Result<String>`: The response text, or an error if the request fails or
///   the response cannot be parsed.
pub async fn get(url: &str, headers: Option<header::HeaderMap>) -> Result<String> {
    get_response(url, headers)
        .await?
        .text()
        .await
        .map_err(|e| anyhow!("Error parsing response text: {:?}", e))
}
