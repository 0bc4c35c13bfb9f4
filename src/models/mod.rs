/*
 * Responsibility
 * - 永続化される Task と、その部分更新命令の型
 */
pub mod task;

pub use task::{Assignment, Task, UpdateInstruction};
