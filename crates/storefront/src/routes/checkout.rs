//! Checkout route handlers.
//!
//! The form is validated locally first; only a clean form is posted to the
//! order API. A successful order empties the cart and shows a confirmation
//! page that returns to the home page after a few seconds.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shopfront_core::checkout::CHECKOUT_FAILED_MESSAGE;
use shopfront_core::{Cart, CheckoutForm, CheckoutOutcome, Field, ValidationErrors};
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::middleware::CartSession;
use crate::routes::cart::CartView;
use crate::state::AppState;

/// Seconds the confirmation page waits before returning home.
pub const SUCCESS_REDIRECT_SECS: u32 = 3;

/// One input of the checkout form.
#[derive(Clone)]
pub struct FieldView {
    /// Form field name, also used for the element id.
    pub name: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    pub placeholder: &'static str,
    pub value: String,
    /// Empty when the field is valid.
    pub error: String,
}

impl FieldView {
    fn build(form: &CheckoutForm, errors: &ValidationErrors) -> Vec<Self> {
        Field::ALL
            .into_iter()
            .map(|field| {
                let (label, input_type, placeholder) = match field {
                    Field::Name => ("First Name", "text", "Enter your first name"),
                    Field::Surname => ("Last Name", "text", "Enter your last name"),
                    Field::PhoneNumber => ("Phone Number", "tel", "+1 (555) 123-4567"),
                    Field::Email => ("Email Address", "email", "your.email@example.com"),
                    Field::ZipCode => ("Zip Code", "text", "12345 or 12345-6789"),
                };
                Self {
                    name: field.as_str(),
                    label,
                    input_type,
                    placeholder,
                    value: form.value(field).to_string(),
                    error: errors.get(field).unwrap_or_default().to_string(),
                }
            })
            .collect()
    }
}

/// Checkout form page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/form.html")]
pub struct CheckoutTemplate {
    pub cart_count: u64,
    pub cart: CartView,
    pub fields: Vec<FieldView>,
    /// Empty unless submission to the order API failed.
    pub general_error: String,
}

impl CheckoutTemplate {
    fn new(cart: &Cart, form: &CheckoutForm, errors: &ValidationErrors) -> Self {
        Self {
            cart_count: cart.total_items(),
            cart: CartView::from(cart),
            fields: FieldView::build(form, errors),
            general_error: String::new(),
        }
    }
}

/// Page shown instead of the form when the cart has nothing in it.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/empty.html")]
pub struct EmptyCartTemplate {
    pub cart_count: u64,
}

/// Order confirmation page.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/success.html")]
pub struct CheckoutSuccessTemplate {
    pub cart_count: u64,
    pub redirect_secs: u32,
}

/// Display the checkout form.
#[instrument(skip(session))]
pub async fn show(session: CartSession) -> Response {
    let cart = session.load().await;
    if cart.is_empty() {
        return EmptyCartTemplate { cart_count: 0 }.into_response();
    }

    CheckoutTemplate::new(&cart, &CheckoutForm::default(), &ValidationErrors::default())
        .into_response()
}

/// Validate and submit the checkout form.
#[instrument(skip(state, session, form))]
pub async fn submit(
    State(state): State<AppState>,
    session: CartSession,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let mut cart = session.load().await;
    if cart.is_empty() {
        return Ok(EmptyCartTemplate { cart_count: 0 }.into_response());
    }

    let errors = form.validate();
    if !errors.is_empty() {
        tracing::info!(invalid_fields = errors.len(), "Checkout form rejected");
        let template = CheckoutTemplate::new(&cart, &form, &errors);
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
    }

    let form = form.trimmed();
    let failure_status = match state.catalog().submit_checkout(&form).await {
        Ok(CheckoutOutcome::Accepted) => {
            add_breadcrumb("checkout", "Order placed", None);
            tracing::info!(items = cart.total_items(), "Checkout succeeded");

            cart.clear();
            session.save(&cart).await?;

            return Ok(CheckoutSuccessTemplate {
                cart_count: 0,
                redirect_secs: SUCCESS_REDIRECT_SECS,
            }
            .into_response());
        }
        Ok(CheckoutOutcome::Rejected { .. }) => StatusCode::OK,
        Err(e) => {
            tracing::error!(error = %e, "Checkout submission failed");
            StatusCode::BAD_GATEWAY
        }
    };

    let mut template = CheckoutTemplate::new(&cart, &form, &ValidationErrors::default());
    template.general_error = CHECKOUT_FAILED_MESSAGE.to_string();
    Ok((failure_status, template).into_response())
}
