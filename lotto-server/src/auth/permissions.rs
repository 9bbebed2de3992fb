//! Permission Definitions
//!
//! 简化的 RBAC 权限:
//! - 查看门店/库位/游戏登录即可
//! - 库存、班次、日结按模块授权
//! - 门店管理仅 admin (见 [`require_admin`](super::require_admin))
//!
//! 令牌直接携带权限列表; `"all"` 与 `"module:*"` 由
//! [`CurrentUser::has_permission`](super::CurrentUser::has_permission) 处理。

/// 游戏/库位/票包 (入库、上架、退回)
pub const INVENTORY_MANAGE: &str = "inventory:manage";

/// 开班、关班、记录开班序号
pub const SHIFTS_MANAGE: &str = "shifts:manage";

/// 日结
pub const DAY_CLOSE: &str = "day:close";

/// 营业日历史
pub const REPORTS_VIEW: &str = "reports:view";
