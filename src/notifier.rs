use crate::config::DeliveryConfig;
use crate::error::{MealError, Result};
use async_trait::async_trait;
use tracing::{info, instrument};

/// Outbound delivery seam for the shopping list.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `body` to `to`. The message does not count as sent until
    /// this returns Ok.
    async fn send(&self, body: &str, to: &str) -> Result<()>;
}

/// Twilio SMS transport
pub struct TwilioNotifier {
    client: reqwest::Client,
    account_sid: String,
    auth_token: String,
    from_phone: String,
}

impl TwilioNotifier {
    pub fn new(config: &DeliveryConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_phone: config.from_phone.clone(),
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.account_sid
        )
    }
}

#[async_trait]
impl Notifier for TwilioNotifier {
    #[instrument(skip(self, body))]
    async fn send(&self, body: &str, to: &str) -> Result<()> {
        let params = [("To", to), ("From", self.from_phone.as_str()), ("Body", body)];

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MealError::Delivery {
                status: status.as_u16(),
                message,
            });
        }

        info!("Delivered shopping list to {}", to);
        Ok(())
    }
}

/// Prints the report instead of delivering it (dry runs)
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn send(&self, body: &str, to: &str) -> Result<()> {
        println!("📋 Shopping list for {to}:");
        print!("{body}");
        Ok(())
    }
}
