// src/services/catalog_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, OutletRepository},
    models::{
        auth::Actor,
        catalog::{Package, PackageFilter, PackagePayload, PackageType, PackageTypePayload},
    },
    services::access_control::{self, OutletScope},
};

#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
    outlet_repo: OutletRepository,
}

impl CatalogService {
    pub fn new(repo: CatalogRepository, outlet_repo: OutletRepository) -> Self {
        Self { repo, outlet_repo }
    }

    // --- JENIS PAKET (catálogo global) ---

    pub async fn list_package_types(&self) -> Result<Vec<PackageType>, AppError> {
        self.repo.list_package_types().await
    }

    pub async fn create_package_type(&self, payload: &PackageTypePayload) -> Result<PackageType, AppError> {
        self.repo.create_package_type(payload).await
    }

    pub async fn update_package_type(&self, id: Uuid, payload: &PackageTypePayload) -> Result<PackageType, AppError> {
        self.repo
            .update_package_type(id, payload)
            .await?
            .ok_or_else(|| AppError::NotFound("Jenis paket tidak ditemukan.".to_string()))
    }

    pub async fn delete_package_type(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete_package_type(id).await? {
            return Err(AppError::NotFound("Jenis paket tidak ditemukan.".to_string()));
        }
        Ok(())
    }

    // --- PAKET (por outlet) ---

    pub async fn list_packages(&self, actor: &Actor, filter: &PackageFilter) -> Result<Vec<Package>, AppError> {
        let scope = OutletScope::of(actor).narrow(filter.outlet_id)?;
        self.repo.list_packages(scope.as_filter(), filter).await
    }

    pub async fn get_package(&self, actor: &Actor, id: Uuid) -> Result<Package, AppError> {
        let package = self.repo.get_package(id).await?;
        self.scoped(actor, package)
    }

    pub async fn create_package(&self, actor: &Actor, payload: &PackagePayload) -> Result<Package, AppError> {
        self.check_references(actor, payload).await?;
        self.repo.create_package(payload).await
    }

    pub async fn update_package(&self, actor: &Actor, id: Uuid, payload: &PackagePayload) -> Result<Package, AppError> {
        self.get_package(actor, id).await?;
        self.check_references(actor, payload).await?;
        self.repo
            .update_package(id, payload)
            .await?
            .ok_or_else(|| AppError::NotFound("Paket tidak ditemukan.".to_string()))
    }

    pub async fn delete_package(&self, actor: &Actor, id: Uuid) -> Result<(), AppError> {
        self.get_package(actor, id).await?;
        if !self.repo.delete_package(id).await? {
            return Err(AppError::NotFound("Paket tidak ditemukan.".to_string()));
        }
        Ok(())
    }

    async fn check_references(&self, actor: &Actor, payload: &PackagePayload) -> Result<(), AppError> {
        access_control::authorize_outlet(actor, payload.outlet_id)?;
        if self.outlet_repo.find_by_id(payload.outlet_id).await?.is_none() {
            return Err(AppError::NotFound("Outlet tidak ditemukan.".to_string()));
        }
        if self.repo.find_package_type(payload.package_type_id).await?.is_none() {
            return Err(AppError::NotFound("Jenis paket tidak ditemukan.".to_string()));
        }
        Ok(())
    }

    // Paket de outro outlet responde como inexistente
    fn scoped(&self, actor: &Actor, package: Option<Package>) -> Result<Package, AppError> {
        package
            .filter(|p| OutletScope::of(actor).contains(p.outlet_id))
            .ok_or_else(|| AppError::NotFound("Paket tidak ditemukan.".to_string()))
    }
}
