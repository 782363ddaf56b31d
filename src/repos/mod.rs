/*
 * Responsibility
 * - ディレクトリ trait の公開 (永続化は外部コラボレータ、ここは interface のみ)
 */
pub mod admin_repo;
pub mod error;
pub mod memory;
pub mod user_repo;
