//! 全局日志订阅者只能安装一次，因此单独放在一个测试二进制中

use armature_demo::config::LoggingConfig;
use armature_demo::core::Game;
use tracing::Level;

#[test]
fn test_env_directives_refine_configured_level() {
    std::env::set_var("RUST_LOG", "loader=debug");
    Game::init_logging(&LoggingConfig::default());

    // 配置中的 info 级别对其他 target 仍然生效
    assert!(tracing::enabled!(target: "engine", Level::INFO));
    assert!(tracing::enabled!(target: "scene", Level::WARN));
    assert!(!tracing::enabled!(target: "engine", Level::DEBUG));

    // RUST_LOG 只放宽 loader
    assert!(tracing::enabled!(target: "loader", Level::DEBUG));
    assert!(!tracing::enabled!(target: "loader", Level::TRACE));

    // 重复初始化无副作用
    Game::init_logging(&LoggingConfig::default());
    assert!(tracing::enabled!(target: "engine", Level::INFO));
}
