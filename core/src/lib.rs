#![no_std]

pub mod asset;
pub mod bitmap;
pub mod bmp;
pub mod letterbox;
pub mod pattern;


extern crate alloc;
