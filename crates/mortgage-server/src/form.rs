//! Calculator form submitted by the widget.
//!
//! The widget posts `FormData` (multipart) while plain HTML forms post
//! urlencoded bodies; both are accepted. Fields arrive as raw strings and are
//! parsed here so the engine only ever sees typed values.

use axum::async_trait;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Form;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use mortgage_core::{MortgageError, MortgageResult, Money, Percent};

use crate::ServerError;

/// Raw form fields. Missing fields count as "0", as the widget always has.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalcForm {
    pub principal: Option<String>,
    pub rate: Option<String>,
    pub years: Option<String>,
}

/// Parsed quote request.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub years: i64,
}

/// Successful quote body.
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub monthly_payment: String,
}

impl CalcForm {
    pub fn parse(&self) -> MortgageResult<QuoteRequest> {
        Ok(QuoteRequest {
            principal: parse_decimal("principal", self.principal.as_deref())?,
            annual_rate_percent: parse_decimal("rate", self.rate.as_deref())?,
            years: parse_years(self.years.as_deref())?,
        })
    }

    fn set(&mut self, name: &str, value: String) {
        match name {
            "principal" => self.principal = Some(value),
            "rate" => self.rate = Some(value),
            "years" => self.years = Some(value),
            _ => {}
        }
    }
}

#[async_trait]
impl<S> FromRequest<S> for CalcForm
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(form) = Form::<CalcForm>::from_request(req, state)
                .await
                .map_err(|e| ServerError::BadRequest(e.body_text()))?;
            return Ok(form);
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ServerError::BadRequest(e.body_text()))?;
        let mut form = CalcForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ServerError::BadRequest(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            let value = field
                .text()
                .await
                .map_err(|e| ServerError::BadRequest(e.body_text()))?;
            form.set(&name, value);
        }
        Ok(form)
    }
}

fn parse_decimal(field: &str, raw: Option<&str>) -> MortgageResult<Decimal> {
    let text = raw.unwrap_or("0").trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| MortgageError::InvalidInput {
            field: field.into(),
            reason: format!("'{text}' is not a number"),
        })
}

fn parse_years(raw: Option<&str>) -> MortgageResult<i64> {
    let text = raw.unwrap_or("0").trim();
    text.parse::<i64>().map_err(|_| MortgageError::InvalidInput {
        field: "years".into(),
        reason: format!("'{text}' is not a whole number of years"),
    })
}
