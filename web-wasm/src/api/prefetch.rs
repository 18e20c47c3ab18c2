//! 背景画像の先読み
//!
//! 画像要素に src を設定してブラウザに取得させるだけ。キャッシュはブラウザ任せ。

/// 背景画像を先読みする（失敗はログのみ）
pub fn prefetch_image(url: &str) {
    match web_sys::HtmlImageElement::new() {
        Ok(img) => {
            img.set_src(url);
            tracing::debug!(url, "prefetching background image");
        }
        Err(err) => {
            tracing::warn!(url, error = ?err, "image prefetch failed");
        }
    }
}
