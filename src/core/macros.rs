//! 核心宏定义

/// 为配置结构体实现 `Default` 的宏
///
/// 使用示例:
/// ```rust
/// use armature_demo::impl_default;
///
/// struct Viewport {
///     width: u32,
///     height: u32,
/// }
///
/// impl_default!(Viewport {
///     width: 400,
///     height: 300,
/// });
///
/// assert_eq!(Viewport::default().width, 400);
/// ```
#[macro_export]
macro_rules! impl_default {
    ($struct_name:ident {
        $($field:ident: $value:expr),* $(,)?
    }) => {
        impl Default for $struct_name {
            fn default() -> Self {
                Self {
                    $($field: $value),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    struct LoopSettings {
        fps: u32,
        label: String,
    }

    impl_default!(LoopSettings {
        fps: 60,
        label: "main".to_string(),
    });

    #[test]
    fn test_impl_default() {
        let settings = LoopSettings::default();
        assert_eq!(settings.fps, 60);
        assert_eq!(settings.label, "main");
    }
}
