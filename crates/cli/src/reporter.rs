//! User-facing progress reporting.
//!
//! All message templates live on an explicit `Reporter` constructed
//! once from the `--lang` flag; nothing global and nothing locale-aware
//! below the CLI layer.

use clap::ValueEnum;
use std::path::Path;

/// Report language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Lang {
    /// English
    En,
    /// Chinese
    Zh,
}

/// Per-file and batch progress reporter.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    lang: Lang,
}

impl Reporter {
    /// Create a reporter for the given language.
    pub fn new(lang: Lang) -> Self {
        Self { lang }
    }

    pub fn init(&self) {
        match self.lang {
            Lang::En => println!("--- deckslim initialized ---"),
            Lang::Zh => println!("--- PPT/PDF瘦身器 初始化 ---"),
        }
    }

    pub fn processing(&self, path: &Path) {
        let name = file_name(path);
        match self.lang {
            Lang::En => println!("\n[File] {}", name),
            Lang::Zh => println!("\n[文件] {}", name),
        }
    }

    pub fn analyzing(&self) {
        match self.lang {
            Lang::En => println!("   - Analyzing content..."),
            Lang::Zh => println!("   - 正在分析内容..."),
        }
    }

    pub fn skip_unsupported(&self) {
        match self.lang {
            Lang::En => {
                println!("   - Skipped: unsupported file type (only .pdf, .pptx are supported).")
            }
            Lang::Zh => println!("   - 跳过: 不支持的文件类型 (仅支持 .pdf, .pptx)。"),
        }
    }

    pub fn single_unit(&self) {
        match self.lang {
            Lang::En => {
                println!("   - File has only one page/slide or is empty, nothing to do.")
            }
            Lang::Zh => println!("   - 文件只有一页/一张幻灯片或为空，无需处理。"),
        }
    }

    pub fn no_redundancy(&self) {
        match self.lang {
            Lang::En => println!("   - No removable redundant pages/slides found."),
            Lang::Zh => println!("   - 未发现可移除的冗余页面/幻灯片。"),
        }
    }

    pub fn success(&self, original: usize, retained: usize, output: &Path) {
        let name = file_name(output);
        match self.lang {
            Lang::En => println!(
                "   => Done! Original count: {}, slimmed: {}. Saved to: {}",
                original, retained, name
            ),
            Lang::Zh => println!(
                "   => 成功! 原始数量: {}, 瘦身后: {}。已保存至: {}",
                original, retained, name
            ),
        }
    }

    pub fn dry_run(&self, original: usize, would_retain: usize) {
        match self.lang {
            Lang::En => println!(
                "   => Dry run: would keep {} of {} pages/slides.",
                would_retain, original
            ),
            Lang::Zh => println!(
                "   => 试运行: 将保留 {} / {} 页/幻灯片。",
                would_retain, original
            ),
        }
    }

    pub fn failure(&self, error: &anyhow::Error) {
        match self.lang {
            Lang::En => eprintln!("   - Processing failed: {:#}", error),
            Lang::Zh => eprintln!("   - 处理失败: {:#}", error),
        }
    }

    pub fn all_done(&self) {
        match self.lang {
            Lang::En => println!("\n--- All tasks completed. ---"),
            Lang::Zh => println!("\n--- 所有任务已完成。 ---"),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
