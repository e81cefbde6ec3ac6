//! Outbox lead gateway
//!
//! Appends each lead as one JSON line to a local file. Useful offline and as
//! a default: a separate process can drain the outbox later.

use super::lead_body;
use crate::logging::stamp;
use async_trait::async_trait;
use quote_application::{GatewayError, LeadGateway, LeadKind, SubmissionReceipt};
use quote_domain::{ContactForm, WizardAnswers};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

const CHANNEL: &str = "outbox";

struct OutboxFile {
    file: File,
    /// Number of records already in the file
    lines: u64,
}

/// Gateway that writes leads to a JSONL outbox file.
///
/// The receipt reference is the 1-based line number of the record.
pub struct OutboxLeadGateway {
    inner: Mutex<OutboxFile>,
    path: PathBuf,
}

impl OutboxLeadGateway {
    /// Open (or create) the outbox at `path`, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GatewayError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let lines = match File::open(path) {
            Ok(existing) => BufReader::new(existing).lines().map_while(Result::ok).count() as u64,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => return Err(e.into()),
        };

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        info!(path = %path.display(), existing = lines, "Outbox opened");

        Ok(Self {
            inner: Mutex::new(OutboxFile { file, lines }),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, kind: LeadKind, lead: &impl Serialize) -> Result<SubmissionReceipt, GatewayError> {
        let record = stamp(kind.as_str(), lead_body(kind, lead)?);
        let line = serde_json::to_string(&record)?;

        let mut outbox = self
            .inner
            .lock()
            .map_err(|_| GatewayError::Unavailable("outbox lock poisoned".to_string()))?;
        writeln!(outbox.file, "{}", line)?;
        outbox.file.flush()?;
        outbox.lines += 1;

        debug!(kind = %kind, line = outbox.lines, "Lead written to outbox");
        Ok(SubmissionReceipt::new(outbox.lines.to_string(), CHANNEL))
    }
}

#[async_trait]
impl LeadGateway for OutboxLeadGateway {
    fn channel(&self) -> &'static str {
        CHANNEL
    }

    async fn send_quote(&self, answers: &WizardAnswers) -> Result<SubmissionReceipt, GatewayError> {
        self.append(LeadKind::Quote, answers)
    }

    async fn send_contact(&self, form: &ContactForm) -> Result<SubmissionReceipt, GatewayError> {
        self.append(LeadKind::Contact, form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_domain::{AnswerField, ContactField};
    use serde_json::Value;

    fn records(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_appends_quote_and_contact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("outbox.jsonl");
        let gateway = OutboxLeadGateway::open(&path).unwrap();

        let mut answers = WizardAnswers::default();
        answers.set(AnswerField::ServiceType, "web");
        let receipt = gateway.send_quote(&answers).await.unwrap();
        assert_eq!(receipt, SubmissionReceipt::new("1", "outbox"));

        let mut form = ContactForm::new();
        form.set(ContactField::Name, "Ann");
        let receipt = gateway.send_contact(&form).await.unwrap();
        assert_eq!(receipt.reference, "2");

        let records = records(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["kind"], "quote");
        assert_eq!(records[0]["type"], "quote");
        assert_eq!(records[0]["serviceType"], "web");
        assert!(records[0].get("timestamp").is_some());
        assert_eq!(records[1]["kind"], "contact");
        assert_eq!(records[1]["name"], "Ann");
    }

    #[tokio::test]
    async fn test_reference_continues_existing_outbox() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outbox.jsonl");
        std::fs::write(&path, "{}\n{}\n").unwrap();

        let gateway = OutboxLeadGateway::open(&path).unwrap();
        let receipt = gateway
            .send_quote(&WizardAnswers::default())
            .await
            .unwrap();
        assert_eq!(receipt.reference, "3");
    }

    #[test]
    fn test_open_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            OutboxLeadGateway::open(dir.path()),
            Err(GatewayError::Io(_))
        ));
    }
}
