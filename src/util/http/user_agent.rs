use rand::Rng;

const CHROME_VERSIONS: [&str; 12] = [
    "133.0.6943.88", "132.0.6834.110", "131.0.6778.108", "130.0.6723.117",
    "129.0.6668.89", "128.0.6613.138", "127.0.6533.119", "126.0.6478.182",
    "125.0.6422.176", "124.0.6367.243", "123.0.6312.122", "122.0.6261.129",
];

const FIREFOX_VERSIONS: [&str; 10] = [
    "133.0", "132.0", "131.0", "130.0", "129.0", "128.0", "127.0", "126.0", "125.0", "124.0",
];

const EDGE_VERSIONS: [&str; 8] = [
    "133.0.3048.56", "132.0.2957.63", "131.0.2903.112", "130.0.2849.80",
    "129.0.2792.65", "128.0.2739.90", "127.0.2651.105", "126.0.2592.87",
];

fn gen_chrome_ua() -> String {
    let mut rng = rand::rng();
    let version = CHROME_VERSIONS[rng.random_range(0..CHROME_VERSIONS.len())];
    format!(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{} Safari/537.36",
        version
    )
}

fn gen_firefox_ua() -> String {
    let mut rng = rand::rng();
    let version = FIREFOX_VERSIONS[rng.random_range(0..FIREFOX_VERSIONS.len())];
    format!(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:{version}) Gecko/20100101 Firefox/{version}",
        version = version
    )
}

fn gen_edge_ua() -> String {
    let mut rng = rand::rng();
    let version = EDGE_VERSIONS[rng.random_range(0..EDGE_VERSIONS.len())];
    format!(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{version} Safari/537.36 Edg/{version}",
        version = version
    )
}

/// Picks a browser user agent at random, weighted toward Chrome.
pub fn gen_random_ua() -> String {
    let mut rng = rand::rng();
    match rng.random_range(0..10) {
        0..=5 => gen_chrome_ua(),
        6..=7 => gen_firefox_ua(),
        8 => gen_edge_ua(),
        _ => gen_chrome_ua(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gen_random_ua() {
        for _ in 0..10 {
            let ua = gen_random_ua();
            assert!(ua.starts_with("Mozilla/5.0"));
        }
    }
}
