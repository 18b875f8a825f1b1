//! Per-invocation browsing state.
//!
//! Handlers receive the [`Session`] by reference instead of reaching for
//! globals; it owns the catalog, the access gate and the inquiry list.

use std::time::Duration;

use kat_core::{
    AccessGate, AppConfig, InquiryList, MessageTemplate, ProductRepository, WhatsAppLink,
};

pub(crate) struct Session {
    pub(crate) config: AppConfig,
    pub(crate) repository: ProductRepository,
    pub(crate) gate: AccessGate,
    pub(crate) inquiry: InquiryList,
    pub(crate) template: MessageTemplate,
    pub(crate) link: WhatsAppLink,
}

impl Session {
    /// Loads the catalog named in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be read or is not a JSON
    /// array. Malformed records are logged and skipped.
    pub(crate) fn open(config: AppConfig) -> anyhow::Result<Self> {
        let report = ProductRepository::load_from_path(&config.products_path)?;
        if report.rejected_count() > 0 {
            tracing::warn!(
                rejected = report.rejected_count(),
                path = %config.products_path.display(),
                "some catalog records were skipped"
            );
        }

        Ok(Self {
            repository: report.repository,
            gate: AccessGate::default(),
            inquiry: InquiryList::new(),
            template: MessageTemplate::new(config.business_name.clone()),
            link: WhatsAppLink::new(config.whatsapp_phone.clone()),
            config,
        })
    }

    /// Tries the partner code; a wrong code is reported and otherwise ignored.
    pub(crate) fn unlock(&mut self, code: &str) {
        if !self.gate.try_unlock(code, self.config.partner_code.as_deref()) {
            tracing::warn!("partner code not accepted; wholesale prices stay hidden");
        }
    }

    pub(crate) fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.config.loading_delay_ms)
    }
}
