/*
 * Responsibility
 * - auth: bearer token 検証 (署名鍵セットの取得とキャッシュ)
 * - tasks: Task の作成/更新/削除の orchestration と部分更新命令の構築
 * - notify: 作成時の fan-out 通知
 */
pub mod auth;
pub mod notify;
pub mod tasks;
