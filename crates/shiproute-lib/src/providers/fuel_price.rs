use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

use super::http::{build_client, fetch_body};
use super::{FuelPriceProvider, ProviderConfig, FUEL_PRICE_TOKEN_ENV};

const PROVIDER: &str = "fuel price";

/// Latest crude price from the OilPriceAPI service.
#[derive(Debug, Clone)]
pub struct OilPriceClient {
    client: Client,
    url: String,
    token: Option<String>,
}

impl OilPriceClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config.fuel_price_timeout)?,
            url: config.fuel_price_url.clone(),
            token: config.fuel_price_token.clone(),
        })
    }
}

impl FuelPriceProvider for OilPriceClient {
    fn fuel_price(&self) -> Result<f64> {
        let Some(token) = self.token.as_deref() else {
            return Err(Error::provider(
                PROVIDER,
                format!("no API token configured (set {FUEL_PRICE_TOKEN_ENV})"),
            ));
        };

        let request = self.client.get(&self.url).bearer_auth(token);
        let body = fetch_body(request, PROVIDER)?;
        parse_fuel_price(&body)
    }
}

#[derive(Debug, Deserialize)]
struct PriceResponse {
    data: PriceData,
}

#[derive(Debug, Deserialize)]
struct PriceData {
    price: Value,
}

/// Parse the `data.price` field of a latest-price response.
///
/// The price may arrive as a number or a numeric string; anything else, and
/// negative or non-finite values, is reported as
/// [`Error::ProviderUnavailable`].
pub fn parse_fuel_price(body: &str) -> Result<f64> {
    let response: PriceResponse =
        serde_json::from_str(body).map_err(|err| Error::provider(PROVIDER, err))?;

    let price = match &response.data.price {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| {
        Error::provider(
            PROVIDER,
            format!("unexpected price value {}", response.data.price),
        )
    })?;

    if !price.is_finite() || price < 0.0 {
        return Err(Error::provider(
            PROVIDER,
            format!("price must be finite and non-negative, got {price}"),
        ));
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_and_string_prices() {
        let body = r#"{"status":"success","data":{"price":78.42,"formatted":"$78.42","currency":"USD","code":"BRENT_CRUDE_USD"}}"#;
        assert_eq!(parse_fuel_price(body).unwrap(), 78.42);

        let body = r#"{"status":"success","data":{"price":"1.87"}}"#;
        assert_eq!(parse_fuel_price(body).unwrap(), 1.87);
    }

    #[test]
    fn rejects_unusable_prices() {
        for body in [
            r#"{"status":"success","data":{"price":null}}"#,
            r#"{"status":"success","data":{"price":"n/a"}}"#,
            r#"{"status":"success","data":{"price":-3.0}}"#,
            r#"{"status":"error","error":"Unauthorized"}"#,
        ] {
            let err = parse_fuel_price(body).expect_err(body);
            assert!(matches!(err, Error::ProviderUnavailable { .. }), "{body}");
        }
    }

    #[test]
    fn missing_token_fails_before_any_request() {
        let config = ProviderConfig {
            fuel_price_token: None,
            ..ProviderConfig::default()
        };
        let client = OilPriceClient::new(&config).expect("client builds");
        let err = client.fuel_price().expect_err("no token");
        assert!(err.to_string().contains(FUEL_PRICE_TOKEN_ENV));
    }
}
