// crates/warden-gate-core/src/core/defaults.rs
// ============================================================================
// Module: Warden Gate Baseline Translations
// Description: Built-in message sets written when a language file is absent.
// Purpose: Guarantee the catalog never has zero coverage for a supported language.
// Dependencies: Standard library only.
// ============================================================================

//! ## Overview
//! Built-in baselines for the two shipped languages. `ensure_defaults`
//! writes these to disk for any supported language without a file and merges
//! them into the catalog build, so `en_us` coverage always exists after
//! initialization.
//!
//! Templates use positional `%s` placeholders, substituted in order by the
//! resolver.

// ============================================================================
// SECTION: Baseline Catalogs
// ============================================================================

/// Language codes that ship with a built-in baseline.
pub const BUILTIN_LANGUAGES: &[&str] = &["en_us", "zh_cn"];

/// Baseline English message set.
pub const BASELINE_EN_US: &[(&str, &str)] = &[
    ("warden.status.title", "Warden Gate Status"),
    ("warden.status.enabled", "Enabled"),
    ("warden.status.disabled", "Disabled"),
    ("warden.status.engine", "Engine"),
    ("warden.status.debug", "Debug Mode"),
    ("warden.status.language", "Language"),
    ("warden.status.backend", "Permission Backend"),
    ("warden.status.backend.bound", "Connected"),
    ("warden.status.backend.unbound", "Not available"),
    ("warden.command.no_permission", "You do not have permission to use this command"),
    ("warden.command.reload.success", "Configuration reloaded successfully"),
    ("warden.command.reload.failed", "Failed to reload configuration: %s"),
    ("warden.command.reload.log", "Configuration reloaded by %s"),
    ("warden.command.toggle.current", "Current status: %s"),
    ("warden.command.toggle.enable_success", "Warden Gate enabled successfully"),
    ("warden.command.toggle.disable_success", "Warden Gate disabled successfully"),
    ("warden.command.toggle.enable_log", "Warden Gate enabled by %s"),
    ("warden.command.toggle.disable_log", "Warden Gate disabled by %s"),
    ("warden.command.debug.current", "Debug mode: %s"),
    ("warden.command.debug.enable_success", "Debug mode enabled successfully"),
    ("warden.command.debug.disable_success", "Debug mode disabled successfully"),
    ("warden.command.debug.enable_log", "Debug mode enabled by %s"),
    ("warden.command.debug.disable_log", "Debug mode disabled by %s"),
    ("warden.command.language.current", "Current language: %s (%s)"),
    ("warden.command.language.success", "Language changed to %s"),
    ("warden.command.language.unsupported", "Unsupported language: %s"),
    ("warden.command.language.available", "Available languages: %s"),
    ("warden.command.language.auto_mode", "Language set to automatic: %s"),
    ("warden.command.language.console_auto", "Automatic mode is only available to actors"),
    ("warden.command.language.mode_auto", "automatic"),
    ("warden.command.language.mode_manual", "manual"),
    ("warden.command.language.server_default", "server default"),
    ("warden.command.language.log", "Language changed by %s to %s"),
    ("warden.command.exempt.added", "Actor %s added to exemption list"),
    ("warden.command.exempt.removed", "Actor %s removed from exemption list"),
    ("warden.command.exempt.actor_not_found", "Actor not found: %s"),
    ("warden.command.exempt.invalid_state", "Invalid state. Use 'add' or 'remove'"),
    ("warden.command.exempt.failed", "Failed to update exemption list: %s"),
    ("warden.command.help.title", "Warden Gate commands:"),
    ("warden.command.help.reload", "reload - Reload configuration and languages"),
    ("warden.command.help.toggle", "toggle [true|false] - Enable or disable the engine"),
    ("warden.command.help.debug", "debug [true|false] - Manage debug mode"),
    ("warden.command.help.language", "language [<code>|auto] - Show or change language"),
    ("warden.command.help.status", "status - Show engine status"),
    ("warden.command.help.exempt", "exempt <actor> <add|remove> - Manage exemptions"),
    ("warden.command.help.help", "help - Show this help message"),
];

/// Baseline Simplified Chinese message set.
pub const BASELINE_ZH_CN: &[(&str, &str)] = &[
    ("warden.status.title", "Warden Gate 状态"),
    ("warden.status.enabled", "已启用"),
    ("warden.status.disabled", "已禁用"),
    ("warden.status.engine", "引擎"),
    ("warden.status.debug", "调试模式"),
    ("warden.status.language", "语言"),
    ("warden.status.backend", "权限后端"),
    ("warden.status.backend.bound", "已连接"),
    ("warden.status.backend.unbound", "不可用"),
    ("warden.command.no_permission", "你没有权限使用此命令"),
    ("warden.command.reload.success", "配置重载成功"),
    ("warden.command.reload.failed", "配置重载失败: %s"),
    ("warden.command.reload.log", "配置已由 %s 重载"),
    ("warden.command.toggle.current", "当前状态: %s"),
    ("warden.command.toggle.enable_success", "Warden Gate 已成功启用"),
    ("warden.command.toggle.disable_success", "Warden Gate 已成功禁用"),
    ("warden.command.toggle.enable_log", "Warden Gate 已由 %s 启用"),
    ("warden.command.toggle.disable_log", "Warden Gate 已由 %s 禁用"),
    ("warden.command.debug.current", "调试模式: %s"),
    ("warden.command.debug.enable_success", "调试模式已启用"),
    ("warden.command.debug.disable_success", "调试模式已禁用"),
    ("warden.command.debug.enable_log", "调试模式已由 %s 启用"),
    ("warden.command.debug.disable_log", "调试模式已由 %s 禁用"),
    ("warden.command.language.current", "当前语言: %s (%s)"),
    ("warden.command.language.success", "语言已更改为 %s"),
    ("warden.command.language.unsupported", "不支持的语言: %s"),
    ("warden.command.language.available", "可用语言: %s"),
    ("warden.command.language.auto_mode", "语言已设为自动: %s"),
    ("warden.command.language.console_auto", "只有玩家可以使用自动语言模式"),
    ("warden.command.language.mode_auto", "自动"),
    ("warden.command.language.mode_manual", "手动"),
    ("warden.command.language.server_default", "服务器默认"),
    ("warden.command.language.log", "语言已由 %s 更改为 %s"),
    ("warden.command.exempt.added", "已将 %s 加入豁免列表"),
    ("warden.command.exempt.removed", "已将 %s 移出豁免列表"),
    ("warden.command.exempt.actor_not_found", "未找到目标: %s"),
    ("warden.command.exempt.invalid_state", "无效的状态，请使用 'add' 或 'remove'"),
    ("warden.command.exempt.failed", "更新豁免列表失败: %s"),
    ("warden.command.help.title", "Warden Gate 命令:"),
    ("warden.command.help.reload", "reload - 重载配置和语言文件"),
    ("warden.command.help.toggle", "toggle [true|false] - 启用或禁用引擎"),
    ("warden.command.help.debug", "debug [true|false] - 管理调试模式"),
    ("warden.command.help.language", "language [<code>|auto] - 查看或更改语言"),
    ("warden.command.help.status", "status - 查看引擎状态"),
    ("warden.command.help.exempt", "exempt <actor> <add|remove> - 管理豁免"),
    ("warden.command.help.help", "help - 显示此帮助信息"),
];

/// Returns the built-in baseline for a language code, if one ships.
#[must_use]
pub fn baseline_for(code: &str) -> Option<&'static [(&'static str, &'static str)]> {
    match code {
        "en_us" => Some(BASELINE_EN_US),
        "zh_cn" => Some(BASELINE_ZH_CN),
        _ => None,
    }
}
