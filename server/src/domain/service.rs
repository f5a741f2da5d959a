//! Portion use-case implementations.
//!
//! Every operation is a full read-modify-write cycle against the document
//! store. Mutating operations serialize behind one write lock so id
//! allocation and whole-document overwrites cannot race each other.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::sync::Mutex;

use crate::domain::ports::{
    AttachmentStore, AttachmentStoreError, BillAmounts, DocumentStore, DocumentStoreError,
    NewPortion, PortionCommand, PortionQuery, PortionUpdate,
};
use crate::domain::{AttachmentKind, Bill, Error, Portion, normalize_month_key};

/// Upload extensions accepted for both attachment kinds, lowercase.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "pdf"];

/// Portion service implementing the driving ports.
pub struct PortionService<S, A> {
    store: Arc<S>,
    attachments: Arc<A>,
    write_lock: Mutex<()>,
}

impl<S, A> PortionService<S, A> {
    /// Create a new service over the given adapters.
    pub fn new(store: Arc<S>, attachments: Arc<A>) -> Self {
        Self {
            store,
            attachments,
            write_lock: Mutex::new(()),
        }
    }
}

fn map_store_error(error: DocumentStoreError) -> Error {
    Error::storage(error.to_string())
}

fn map_attachment_error(error: AttachmentStoreError) -> Error {
    Error::storage(error.to_string())
}

fn portion_not_found(id: u64) -> Error {
    Error::not_found(format!("no portion with id {id}")).with_details(json!({ "id": id }))
}

fn require(field: &str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(
            Error::invalid_request(format!("missing required field: {field}")).with_details(
                json!({
                    "field": field,
                    "code": "missing_field",
                }),
            ),
        );
    }
    Ok(())
}

fn require_non_negative(field: &str, amount: rust_decimal::Decimal) -> Result<(), Error> {
    if amount.is_sign_negative() {
        return Err(
            Error::invalid_amount(format!("{field} must not be negative")).with_details(json!({
                "field": field,
                "value": amount.to_string(),
            })),
        );
    }
    Ok(())
}

/// Reduce an uploaded filename to a safe flat-file name, in the spirit of
/// werkzeug's `secure_filename`: path separators and anything outside
/// `[A-Za-z0-9._-]` become underscores.
fn sanitize_filename(original: &str) -> String {
    original
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn validate_extension(original_filename: &str) -> Result<(), Error> {
    let extension = original_filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase());
    match extension {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(Error::invalid_file_type(format!(
            "file type not allowed; expected one of: {}",
            ALLOWED_EXTENSIONS.join(", ")
        ))
        .with_details(json!({ "filename": original_filename }))),
    }
}

impl<S, A> PortionService<S, A>
where
    S: DocumentStore,
    A: AttachmentStore,
{
    async fn load(&self) -> Result<crate::domain::Document, Error> {
        self.store.load().await.map_err(map_store_error)
    }

    async fn save(&self, document: &crate::domain::Document) -> Result<(), Error> {
        self.store.save(document).await.map_err(map_store_error)
    }
}

#[async_trait]
impl<S, A> PortionQuery for PortionService<S, A>
where
    S: DocumentStore,
    A: AttachmentStore,
{
    async fn list(&self) -> Result<Vec<Portion>, Error> {
        Ok(self.load().await?.portions)
    }

    async fn get(&self, id: u64) -> Result<Portion, Error> {
        self.load()
            .await?
            .find(id)
            .cloned()
            .ok_or_else(|| portion_not_found(id))
    }

    async fn list_by_floor(&self, floor: &str) -> Result<Vec<Portion>, Error> {
        if floor.is_empty() {
            return Ok(Vec::new());
        }
        let document = self.load().await?;
        Ok(document.by_floor(floor).into_iter().cloned().collect())
    }
}

#[async_trait]
impl<S, A> PortionCommand for PortionService<S, A>
where
    S: DocumentStore,
    A: AttachmentStore,
{
    async fn create(&self, fields: NewPortion) -> Result<Portion, Error> {
        require("floor", &fields.floor)?;
        require("portion_no", &fields.portion_no)?;
        require("type", &fields.portion_type)?;
        require("name", &fields.name)?;
        require("tenant_type", &fields.tenant_type)?;
        require("contact_number", &fields.contact_number)?;

        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await?;
        let portion = Portion {
            id: document.next_id(),
            floor: fields.floor,
            portion_no: fields.portion_no,
            portion_type: fields.portion_type,
            name: fields.name,
            tenant_type: fields.tenant_type,
            members: fields.members,
            contact_number: fields.contact_number,
            contact_number_2: fields.contact_number_2,
            id_proofs: Vec::new(),
            photos: Vec::new(),
            bills: std::collections::BTreeMap::new(),
        };
        document.portions.push(portion.clone());
        self.save(&document).await?;
        Ok(portion)
    }

    async fn update(&self, id: u64, fields: PortionUpdate) -> Result<Portion, Error> {
        require("type", &fields.portion_type)?;
        require("name", &fields.name)?;
        require("tenant_type", &fields.tenant_type)?;
        require("contact_number", &fields.contact_number)?;

        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await?;
        let portion = document.find_mut(id).ok_or_else(|| portion_not_found(id))?;
        portion.portion_type = fields.portion_type;
        portion.name = fields.name;
        portion.tenant_type = fields.tenant_type;
        portion.members = fields.members;
        portion.contact_number = fields.contact_number;
        portion.contact_number_2 = fields.contact_number_2;
        let updated = portion.clone();
        self.save(&document).await?;
        Ok(updated)
    }

    async fn delete(&self, id: u64) -> Result<(), Error> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await?;
        let portion = document.remove(id).ok_or_else(|| portion_not_found(id))?;

        // Adapter treats already-missing files as success, so a partially
        // deleted portion can be retried safely.
        for filename in &portion.id_proofs {
            self.attachments
                .delete(AttachmentKind::IdProof, filename)
                .await
                .map_err(map_attachment_error)?;
        }
        for filename in &portion.photos {
            self.attachments
                .delete(AttachmentKind::Photo, filename)
                .await
                .map_err(map_attachment_error)?;
        }

        self.save(&document).await
    }

    async fn add_attachment(
        &self,
        id: u64,
        kind: AttachmentKind,
        original_filename: &str,
        bytes: Vec<u8>,
    ) -> Result<String, Error> {
        require("filename", original_filename)?;
        validate_extension(original_filename)?;

        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await?;
        if document.find(id).is_none() {
            return Err(portion_not_found(id));
        }

        let stored_name = format!(
            "{id}_{}_{}",
            Utc::now().format("%Y%m%d_%H%M%S"),
            sanitize_filename(original_filename)
        );
        self.attachments
            .save(kind, &stored_name, &bytes)
            .await
            .map_err(map_attachment_error)?;

        // find() above guarantees presence and the write lock is held.
        if let Some(portion) = document.find_mut(id) {
            portion.attachments_mut(kind).push(stored_name.clone());
        }
        self.save(&document).await?;
        Ok(stored_name)
    }

    async fn upsert_bill(&self, id: u64, month: &str, amounts: BillAmounts) -> Result<Bill, Error> {
        let month = normalize_month_key(month);
        require("month", &month)?;
        require_non_negative("rent", amounts.rent)?;
        require_non_negative("water", amounts.water)?;
        require_non_negative("electricity", amounts.electricity)?;
        require_non_negative("extra", amounts.extra)?;

        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await?;
        let portion = document.find_mut(id).ok_or_else(|| portion_not_found(id))?;
        let bill = Bill::new(amounts.rent, amounts.water, amounts.electricity, amounts.extra);
        portion.bills.insert(month, bill.clone());
        self.save(&document).await?;
        Ok(bill)
    }

    async fn delete_bill(&self, id: u64, month: &str) -> Result<(), Error> {
        let month = normalize_month_key(month);

        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await?;
        let portion = document.find_mut(id).ok_or_else(|| portion_not_found(id))?;
        if portion.bills.remove(&month).is_none() {
            return Err(
                Error::bill_not_found(format!("no bill for {month}")).with_details(json!({
                    "id": id,
                    "month": month,
                })),
            );
        }
        self.save(&document).await
    }
}
