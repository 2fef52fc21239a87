use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::entity::prelude::{SystemSettings, SystemSettingsAudit};
use crate::entity::{system_settings, system_settings_audit};
use crate::errors::{Result, SpadaError};
use crate::models::system::{
    entities::SystemSetting, requests::SettingAuditParams, responses::SettingAuditListResponse,
};

use super::SeaOrmStorage;

impl SeaOrmStorage {
    pub(crate) async fn list_all_settings_impl(&self) -> Result<Vec<SystemSetting>> {
        let settings = SystemSettings::find()
            .order_by(system_settings::Column::Key, Order::Asc)
            .all(&self.db)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to list settings: {e}")))?;

        Ok(settings.into_iter().map(|s| s.into_setting()).collect())
    }

    pub(crate) async fn get_setting_by_key_impl(&self, key: &str) -> Result<Option<SystemSetting>> {
        let setting = SystemSettings::find_by_id(key.to_string())
            .one(&self.db)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to query setting: {e}")))?;

        Ok(setting.map(|s| s.into_setting()))
    }

    pub(crate) async fn update_setting_impl(
        &self,
        key: &str,
        value: &str,
        user_id: i64,
        ip_address: Option<String>,
    ) -> Result<SystemSetting> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let existing = SystemSettings::find_by_id(key.to_string())
            .one(&txn)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to query setting: {e}")))?
            .ok_or_else(|| SpadaError::not_found(format!("Setting not found: {key}")))?;

        let old_value = existing.value.clone();

        let mut active_model: system_settings::ActiveModel = existing.into();
        active_model.value = Set(value.to_string());
        active_model.updated_at = Set(now);
        active_model.updated_by = Set(Some(user_id));

        let updated = active_model
            .update(&txn)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to update setting: {e}")))?;

        let audit = system_settings_audit::ActiveModel {
            setting_key: Set(key.to_string()),
            old_value: Set(Some(old_value)),
            new_value: Set(value.to_string()),
            changed_by: Set(user_id),
            changed_at: Set(now),
            ip_address: Set(ip_address),
            ..Default::default()
        };

        audit
            .insert(&txn)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to write audit log: {e}")))?;

        txn.commit().await?;

        Ok(updated.into_setting())
    }

    /// Newest first.
    pub(crate) async fn list_setting_audits_impl(
        &self,
        query: SettingAuditParams,
    ) -> Result<SettingAuditListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut find = SystemSettingsAudit::find();

        if let Some(key) = &query.key {
            find = find.filter(system_settings_audit::Column::SettingKey.eq(key.as_str()));
        }

        if let Some(changed_by) = query.changed_by {
            find = find.filter(system_settings_audit::Column::ChangedBy.eq(changed_by));
        }

        let find = find
            .order_by(system_settings_audit::Column::ChangedAt, Order::Desc)
            .order_by(system_settings_audit::Column::Id, Order::Desc);

        let (audits, pagination) = self.fetch_page(find, page, size).await?;

        Ok(SettingAuditListResponse {
            items: audits.into_iter().map(|a| a.into_audit()).collect(),
            pagination,
        })
    }
}
