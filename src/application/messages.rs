//! Fixed user-facing messages
//!
//! One localized message per failure class. Raw transport error text never
//! reaches the UI; the generic message is the only fallback.

use crate::domain::error::ApiError;

pub const BAD_REQUEST: &str = "Yêu cầu không hợp lệ đến máy chủ (tham số sai). Vui lòng kiểm tra bộ lọc/từ khóa tìm kiếm của bạn và thử lại. Nếu lỗi tiếp diễn, báo cho bộ phận hỗ trợ.";
pub const OFFLINE: &str = "Không thể kết nối đến máy chủ. Vui lòng kiểm tra kết nối mạng của bạn.";
pub const SERVER_ERROR: &str = "Máy chủ đang gặp sự cố. Chúng tôi đang cố gắng khắc phục. Vui lòng thử lại sau.";
pub const BAD_RESPONSE: &str = "Phản hồi từ máy chủ không hợp lệ. Vui lòng thử lại.";
pub const GENERIC: &str = "Có lỗi xảy ra khi tải sản phẩm. Vui lòng thử lại.";
pub const RETRIES_EXHAUSTED: &str = "Không thể tải sản phẩm sau nhiều lần thử. Vui lòng thử lại sau.";
pub const DETAIL_FAILED: &str = "Không thể tải chi tiết sản phẩm. Mã lỗi:";
pub const PROFILE_LOAD_FAILED: &str = "Không thể tải hồ sơ người dùng. Vui lòng thử lại.";
pub const PROFILE_UPDATE_FAILED: &str = "Không thể cập nhật hồ sơ. Vui lòng thử lại.";
pub const NO_PROFILE_TO_UPDATE: &str = "Không có hồ sơ để cập nhật.";
pub const LOGIN_FAILED: &str = "Đăng nhập thất bại. Vui lòng thử lại.";
pub const SIGNUP_FAILED: &str = "Đăng ký thất bại.";

/// Message shown while a query is being retried or after it finally fails.
pub fn for_search_error(err: &ApiError) -> &'static str {
    match err {
        ApiError::InvalidInput { .. } => BAD_REQUEST,
        ApiError::NetworkUnavailable { .. } => OFFLINE,
        ApiError::ServerTransient { .. } => SERVER_ERROR,
        ApiError::MalformedResponse { .. } => BAD_RESPONSE,
        ApiError::Timeout | ApiError::Client { .. } => GENERIC,
    }
}
