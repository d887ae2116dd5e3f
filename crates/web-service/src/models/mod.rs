//! 接口层数据结构
//!
//! 请求结构体都开启了 `deny_unknown_fields`，客户端传入服务端维护的字段时直接返回422。

pub mod donations;
pub mod err;
pub mod projects;
pub mod reports;
pub mod users;
