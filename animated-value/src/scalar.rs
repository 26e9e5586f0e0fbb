//! # Scalar 模块
//!
//! 可动画数值的数值类型抽象。缓动计算统一在 `f64` 上进行，
//! 数值类型只需提供与 `f64` 的互相转换和少量常量。

use std::fmt::Debug;
use std::ops::{Add, Neg, Rem, Sub};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{AnimError, AnimResult};

/// 可动画的数值类型
pub trait Scalar:
    Copy
    + PartialEq
    + PartialOrd
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Rem<Output = Self>
    + Neg<Output = Self>
    + Serialize
    + DeserializeOwned
    + 'static
{
    /// 零
    const ZERO: Self;
    /// 正无穷
    const INFINITY: Self;
    /// 负无穷
    const NEG_INFINITY: Self;
    /// 机器精度，作为 `exclusive_precision` 的默认值
    const EPSILON: Self;

    /// 从 `f64` 转换
    fn from_f64(value: f64) -> Self;

    /// 转换为 `f64`
    fn to_f64(self) -> f64;

    /// 是否为 NaN
    fn is_nan(self) -> bool;

    /// 是否为有限值
    fn is_finite(self) -> bool;
}

macro_rules! impl_scalar {
    ($($ty:ident),*) => {
        $(
            impl Scalar for $ty {
                const ZERO: Self = 0.0;
                const INFINITY: Self = $ty::INFINITY;
                const NEG_INFINITY: Self = $ty::NEG_INFINITY;
                const EPSILON: Self = $ty::EPSILON;

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $ty
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn is_nan(self) -> bool {
                    $ty::is_nan(self)
                }

                #[inline]
                fn is_finite(self) -> bool {
                    $ty::is_finite(self)
                }
            }
        )*
    };
}

impl_scalar!(f32, f64);

/// 要求参数为有限值
pub(crate) fn ensure_finite<T: Scalar>(name: &'static str, value: T) -> AnimResult<T> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnimError::invalid_argument(
            name,
            format!("必须是有限数值，实际为 {value:?}"),
        ))
    }
}

/// 要求参数不是 NaN（允许无穷值）
pub(crate) fn ensure_number<T: Scalar>(name: &'static str, value: T) -> AnimResult<T> {
    if value.is_nan() {
        Err(AnimError::invalid_argument(name, "不能为 NaN"))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f64_roundtrip_constants() {
        assert_eq!(<f64 as Scalar>::EPSILON, f64::EPSILON);
        assert_eq!(f64::from_f64(2.5), 2.5);
        assert_eq!(Scalar::to_f64(2.5_f32), 2.5);
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("target", 1.0_f64), Ok(1.0));
        assert!(ensure_finite("target", f64::NAN).is_err());
        assert!(ensure_finite("target", f64::INFINITY).is_err());
    }

    #[test]
    fn test_ensure_number_accepts_infinity() {
        assert_eq!(ensure_number("min", f64::NEG_INFINITY), Ok(f64::NEG_INFINITY));
        assert!(ensure_number("min", f32::NAN).is_err());
    }
}
