//! SQL 片段拼接工具。

#[derive(Debug, Default, Clone)]
pub(crate) struct StringBuilder {
    buf: String,
}

impl StringBuilder {
    pub(crate) fn new() -> Self {
        Self { buf: String::new() }
    }

    pub(crate) fn write_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    pub(crate) fn write_char(&mut self, c: char) {
        self.buf.push(c);
    }

    /// 写入一个空格和 `s`。
    pub(crate) fn write_word(&mut self, s: &str) {
        self.buf.push(' ');
        self.buf.push_str(s);
    }

    /// 重复写入 `s` 共 `n` 次（用于分组括号）。
    pub(crate) fn write_repeat(&mut self, s: &str, n: usize) {
        for _ in 0..n {
            self.buf.push_str(s);
        }
    }

    /// 以 `sep` 连接 `items`，每一项由 `f` 写入。
    pub(crate) fn write_joined<T>(
        &mut self,
        items: &[T],
        sep: &str,
        mut f: impl FnMut(&mut String, &T),
    ) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.buf.push_str(sep);
            }
            f(&mut self.buf, item);
        }
    }

    pub(crate) fn buf_mut(&mut self) -> &mut String {
        &mut self.buf
    }

    pub(crate) fn into_string(self) -> String {
        self.buf
    }
}
