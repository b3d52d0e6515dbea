pub mod a001_chat;
pub mod a002_arena;
pub mod a003_files;
