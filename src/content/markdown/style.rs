//! Inline styles for rendered article markup

pub const SPACER: &str = "height: 16px;";

pub const HEADINGS: [&str; 6] = [
    "font-size: 2.25rem; font-weight: 700; color: #111827; margin-bottom: 1.5rem; margin-top: 2rem; line-height: 1.2;",
    "font-size: 1.875rem; font-weight: 600; color: #1f2937; margin-bottom: 1rem; margin-top: 1.5rem; line-height: 1.3;",
    "font-size: 1.5rem; font-weight: 600; color: #1f2937; margin-bottom: 0.75rem; margin-top: 1.25rem; line-height: 1.3;",
    "font-size: 1.25rem; font-weight: 500; color: #374151; margin-bottom: 0.5rem; margin-top: 1rem; line-height: 1.4;",
    "font-size: 1.125rem; font-weight: 500; color: #374151; margin-bottom: 0.5rem; margin-top: 0.75rem; line-height: 1.4;",
    "font-size: 1rem; font-weight: 500; color: #4b5563; margin-bottom: 0.5rem; margin-top: 0.75rem; line-height: 1.4;",
];

pub const CODE_BLOCK: &str = "background-color: #1f2937; color: #10b981; padding: 1rem; border-radius: 0.5rem; overflow-x: auto; margin-bottom: 1.5rem; font-family: 'Courier New', monospace; font-size: 0.875rem;";

pub const TABLE_WRAPPER: &str = "overflow-x: auto; margin-bottom: 1.5rem;";
pub const TABLE: &str = "min-width: 100%; border: 1px solid #e5e7eb; border-radius: 0.5rem; border-collapse: collapse;";
pub const TABLE_HEAD: &str = "background-color: #f9fafb;";
pub const TABLE_HEADER_CELL: &str = "padding: 0.75rem; text-align: left; font-weight: 600; color: #111827; border-bottom: 1px solid #e5e7eb;";
pub const TABLE_ROW: &str = "border-bottom: 1px solid #e5e7eb;";
pub const TABLE_CELL: &str = "padding: 0.75rem; color: #374151;";

pub const BLOCKQUOTE: &str = "border-left: 4px solid #3b82f6; padding-left: 1rem; padding-top: 0.5rem; padding-bottom: 0.5rem; margin-bottom: 1rem; color: #4b5563; font-style: italic; background-color: #eff6ff; border-radius: 0 0.5rem 0.5rem 0;";

pub const UNORDERED_LIST: &str = "list-style-type: disc; padding-left: 2rem; margin-bottom: 1rem;";
pub const ORDERED_LIST: &str = "list-style-type: decimal; padding-left: 2rem; margin-bottom: 1rem;";
pub const LIST_ITEM: &str = "margin-bottom: 0.25rem; color: #374151; line-height: 1.5;";

pub const RULE: &str = "border: none; border-top: 2px solid #d1d5db; margin: 1.5rem 0;";
pub const PARAGRAPH: &str = "margin-bottom: 1rem; color: #374151; line-height: 1.6;";

pub const IMAGE: &str = "max-width: 100%; height: auto; border-radius: 0.5rem; box-shadow: 0 4px 6px -1px rgba(0, 0, 0, 0.1); margin: 1rem 0;";
pub const LINK: &str = "color: #2563eb; text-decoration: underline;";
pub const INLINE_CODE: &str = "background-color: #f3f4f6; color: #dc2626; padding: 0.125rem 0.25rem; border-radius: 0.25rem; font-size: 0.875rem; font-family: 'Courier New', monospace;";
pub const STRONG: &str = "font-weight: 700;";
pub const EM: &str = "font-style: italic;";
pub const DEL: &str = "text-decoration: line-through; color: #6b7280;";

pub const BODY: &str = "line-height: 1.6; color: #374151; font-family: system-ui, -apple-system, sans-serif;";

pub const ERROR_PANEL: &str = "background-color: #fef2f2; border: 1px solid #fecaca; border-radius: 0.5rem; padding: 1.5rem;";
pub const ERROR_TITLE: &str = "font-size: 1.125rem; font-weight: 600; color: #991b1b; margin-bottom: 0.5rem;";
pub const ERROR_TEXT: &str = "color: #b91c1c; margin-bottom: 1rem;";
pub const ERROR_SUMMARY: &str = "cursor: pointer; color: #dc2626;";
pub const ERROR_PREVIEW: &str = "margin-top: 0.5rem; padding: 0.75rem; background-color: #fee2e2; border-radius: 0.25rem; font-size: 0.75rem; overflow: auto; max-height: 10rem;";
