//! Gesture-driven side drawer controller.
//!
//! A [`DrawerController`](drawer::DrawerController) owns a menu page and an ordered set of front
//! pages. The front page slides to the right to reveal the menu, either through explicit
//! [`toggle`](drawer::DrawerController::toggle) calls or through drag gestures which are turned
//! into an open or closed state when they end.

pub mod animation;
pub mod drawer;
pub mod utils;
