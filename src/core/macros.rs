//! 核心宏定义

/// 为配置结构体实现Default trait的宏
///
/// 使用示例:
/// ```rust
/// use starburst::impl_default;
///
/// struct Limits {
///     min: u32,
///     max: u32,
/// }
///
/// impl_default!(Limits { min: 1, max: 100 });
///
/// assert_eq!(Limits::default().max, 100);
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
