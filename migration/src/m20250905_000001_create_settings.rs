use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SystemSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SystemSettings::Key)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SystemSettings::Value).text().not_null())
                    .col(
                        ColumnDef::new(SystemSettings::ValueType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SystemSettings::Description).text().null())
                    .col(
                        ColumnDef::new(SystemSettings::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SystemSettings::UpdatedBy)
                            .big_integer()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SystemSettingsAudit::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SystemSettingsAudit::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SystemSettingsAudit::SettingKey)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SystemSettingsAudit::OldValue).text().null())
                    .col(
                        ColumnDef::new(SystemSettingsAudit::NewValue)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SystemSettingsAudit::ChangedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SystemSettingsAudit::ChangedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SystemSettingsAudit::IpAddress)
                            .string()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_system_settings_audit_setting_key")
                    .table(SystemSettingsAudit::Table)
                    .col(SystemSettingsAudit::SettingKey)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_system_settings_audit_changed_at")
                    .table(SystemSettingsAudit::Table)
                    .col(SystemSettingsAudit::ChangedAt)
                    .to_owned(),
            )
            .await?;

        // Defaults
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();

        let default_settings = [
            ("app.school_name", "SPADA", "string", "School name"),
            (
                "app.academic_year",
                "2025/2026",
                "string",
                "Current academic year",
            ),
            ("app.semester", "1", "integer", "Current semester (1 or 2)"),
            (
                "jwt.access_token_expiry",
                "1440",
                "integer",
                "Access token lifetime (minutes)",
            ),
            (
                "upload.max_size",
                "20971520",
                "integer",
                "Maximum upload size (bytes)",
            ),
            (
                "upload.allowed_types",
                r#"[".pdf",".doc",".docx",".xls",".xlsx",".ppt",".pptx",".txt",".zip",".rar",".7z",".jpg",".jpeg",".png",".gif",".webp"]"#,
                "json_array",
                "Allowed upload extensions",
            ),
        ];

        for (key, value, value_type, description) in default_settings {
            let insert = Query::insert()
                .into_table(SystemSettings::Table)
                .columns([
                    SystemSettings::Key,
                    SystemSettings::Value,
                    SystemSettings::ValueType,
                    SystemSettings::Description,
                    SystemSettings::UpdatedAt,
                ])
                .values_panic([
                    key.into(),
                    value.into(),
                    value_type.into(),
                    description.into(),
                    now.into(),
                ])
                .to_owned();

            manager.exec_stmt(insert).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SystemSettingsAudit::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SystemSettings::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum SystemSettings {
    #[sea_orm(iden = "system_settings")]
    Table,
    Key,
    Value,
    ValueType,
    Description,
    UpdatedAt,
    UpdatedBy,
}

#[derive(DeriveIden)]
enum SystemSettingsAudit {
    #[sea_orm(iden = "system_settings_audit")]
    Table,
    Id,
    SettingKey,
    OldValue,
    NewValue,
    ChangedBy,
    ChangedAt,
    IpAddress,
}
