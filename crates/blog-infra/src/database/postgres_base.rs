use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DbConn, DbErr, EntityTrait, IntoActiveModel, Iterable, PrimaryKeyToColumn,
    PrimaryKeyTrait, QueryOrder, SqlErr, TryIntoModel,
};

use blog_core::error::RepoError;
use blog_core::ports::BaseRepository;

/// Generic PostgreSQL repository implementation.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

/// Classify a SeaORM error for the domain layer.
pub(crate) fn repo_error(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => RepoError::Constraint(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => RepoError::Constraint(msg),
        _ => match err {
            DbErr::Conn(e) => RepoError::Connection(e.to_string()),
            DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
            other => RepoError::Query(other.to_string()),
        },
    }
}

#[async_trait]
impl<E, T, ID> BaseRepository<T, ID> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + TryIntoModel<E::Model> + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: From<E::Model> + Into<E::ActiveModel> + Send + Sync + 'static,
{
    async fn find_all(&self) -> Result<Vec<T>, RepoError> {
        let mut query = E::find();
        for key in E::PrimaryKey::iter() {
            query = query.order_by_asc(key.into_column());
        }

        let rows = query.all(&self.db).await.map_err(repo_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id).one(&self.db).await.map_err(repo_error)?;

        Ok(result.map(Into::into))
    }

    async fn save(&self, entity: T) -> Result<T, RepoError> {
        // A set primary key makes SeaORM issue an UPDATE; a missing key an INSERT.
        let active_model: E::ActiveModel = entity.into();
        let fallback = active_model.clone();

        match active_model.save(&self.db).await {
            Ok(saved) => {
                let model = saved.try_into_model().map_err(repo_error)?;
                Ok(model.into())
            }
            Err(DbErr::RecordNotUpdated) => {
                // No row carries that id: insert under a freshly generated one.
                let mut fresh = fallback;
                for key in E::PrimaryKey::iter() {
                    fresh.not_set(key.into_column());
                }
                let model = fresh.insert(&self.db).await.map_err(repo_error)?;
                Ok(model.into())
            }
            Err(e) => Err(repo_error(e)),
        }
    }

    async fn delete(&self, id: ID) -> Result<(), RepoError> {
        let result = E::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(repo_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
