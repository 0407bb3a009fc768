//! 场景相机

use crate::core::error::{SceneError, SceneResult};

/// RGBA 颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// 解析 `#RGB`、`#RRGGBB` 或 `#RRGGBBAA`
    pub fn from_hex(text: &str) -> SceneResult<Self> {
        let invalid = || SceneError::InvalidColor(text.to_string());
        let hex = text.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

        match hex.len() {
            3 => {
                let nibble = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| invalid())
                };
                Ok(Self::rgba(nibble(0)?, nibble(1)?, nibble(2)?, 255))
            }
            6 => Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(invalid()),
        }
    }

    pub fn to_f32_array(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

/// 2D 相机（视口 + 背景色）
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub background_color: Color,
}

impl Camera {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            background_color: Color::TRANSPARENT,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width * 0.5
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height * 0.5
    }

    pub fn set_background_color(&mut self, color: &str) -> SceneResult<&mut Self> {
        self.background_color = Color::from_hex(color)?;
        Ok(self)
    }

    pub fn set_viewport(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        self
    }
}

/// 场景相机集合
#[derive(Debug, Clone, PartialEq)]
pub struct Cameras {
    pub main: Camera,
}

impl Cameras {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            main: Camera::new(0.0, 0.0, width as f32, height as f32),
        }
    }
}
