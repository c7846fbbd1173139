//! RTF to Markdown.
//!
//! Control words are stripped to plain text, which then goes through the
//! plain text adapter.

use super::MarkdownAdapter;
use crate::detect::Format;
use crate::error::Result;
use crate::model::SourceDocument;

/// Strips RTF markup and converts the remaining text.
#[derive(Debug, Clone, Copy, Default)]
pub struct RtfAdapter;

impl MarkdownAdapter for RtfAdapter {
    fn format(&self) -> Format {
        Format::Rtf
    }

    #[cfg(feature = "rtf")]
    fn to_markdown(&self, source: &SourceDocument) -> Result<String> {
        let text = rtf_to_text(source.text()?)?;
        Ok(super::text::text_to_markdown(&text))
    }

    #[cfg(not(feature = "rtf"))]
    fn to_markdown(&self, _source: &SourceDocument) -> Result<String> {
        Err(crate::error::Error::MissingDependency {
            format: Format::Rtf,
            feature: "rtf",
            package: "regex",
        })
    }
}

#[cfg(feature = "rtf")]
pub use strip::rtf_to_text;

#[cfg(feature = "rtf")]
mod strip {
    use crate::error::{Error, Result};
    use encoding_rs::Encoding;
    use regex::Regex;
    use std::sync::OnceLock;

    const TOKEN_PATTERN: &str =
        r"(?i)\\([a-z]{1,32})(-?\d{1,10})?[ ]?|\\'([0-9a-f]{2})|\\([^a-z])|([{}])|[\r\n]+|(.)";

    static TOKENS: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();

    /// The compiled RTF tokenizer, built on first use.
    pub(super) fn token_regex() -> Result<&'static Regex> {
        TOKENS
            .get_or_init(|| Regex::new(TOKEN_PATTERN))
            .as_ref()
            .map_err(|e| Error::InvalidData(format!("RTF tokenizer: {}", e)))
    }

    /// Groups whose content is not document text.
    const DESTINATIONS: &[&str] = &[
        "aftncn", "aftnsep", "aftnsepc", "annotation", "atnauthor", "atndate", "atnicn", "atnid",
        "atnparent", "atnref", "atntime", "atrfend", "atrfstart", "author", "background",
        "bkmkend", "bkmkstart", "blipuid", "buptim", "category", "colorschememapping",
        "colortbl", "comment", "company", "creatim", "datafield", "datastore", "defchp", "defpap",
        "do", "doccomm", "docvar", "dptxbxtext", "ebcend", "ebcstart", "factoidname",
        "falt", "fchars", "ffdeftext", "ffentrymcr", "ffexitmcr", "ffformat", "ffhelptext",
        "ffl", "ffname", "ffstattext", "file", "filetbl", "fldinst", "fldtype",
        "fname", "fontemb", "fontfile", "fonttbl", "footer", "footerf", "footerl",
        "footerr", "footnote", "formfield", "ftncn", "ftnsep", "ftnsepc", "g", "generator",
        "gridtbl", "header", "headerf", "headerl", "headerr", "hl", "hlfr", "hlinkbase",
        "hlloc", "hlsrc", "hsv", "htmltag", "info", "keycode", "keywords", "latentstyles",
        "lchars", "levelnumbers", "leveltext", "lfolevel", "linkval", "list", "listlevel",
        "listname", "listoverride", "listoverridetable", "listpicture", "liststylename",
        "listtable", "listtext", "lsdlockedexcept", "macc", "maccPr", "mailmerge", "maln",
        "malnScr", "manager", "margPr", "mbar", "mbarPr", "mbaseJc", "mbegChr", "mborderBox",
        "mborderBoxPr", "mbox", "mboxPr", "mchr", "mcount", "mctrlPr", "md", "mdeg", "mdegHide",
        "mden", "mdiff", "mdPr", "me", "mendChr", "meqArr", "meqArrPr", "mf", "mfName", "mfPr",
        "mfunc", "mfuncPr", "mgroupChr", "mgroupChrPr", "mgrow", "mhideBot", "mhideLeft",
        "mhideRight", "mhideTop", "mhtmltag", "mlim", "mlimloc", "mlimlow", "mlimlowPr",
        "mlimupp", "mlimuppPr", "mm", "mmaddfieldname", "mmath", "mmathPict", "mmathPr",
        "mmaxdist", "mmc", "mmcJc", "mmconnectstr", "mmconnectstrdata", "mmcPr", "mmcs",
        "mmdatasource", "mmheadersource", "mmmailsubject", "mmodso", "mmodsofilter",
        "mmodsofldmpdata", "mmodsomappedname", "mmodsoname", "mmodsorecipdata", "mmodsosort",
        "mmodsosrc", "mmodsotable", "mmodsoudl", "mmodsoudldata", "mmodsouniquetag", "mmPr",
        "mmquery", "mmr", "mnary", "mnaryPr", "mnoBreak", "mnum", "mobjDist", "moMath",
        "moMathPara", "moMathParaPr", "mopEmu", "mphant", "mphantPr", "mplcHide", "mpos",
        "mr", "mrad", "mradPr", "mrPr", "msepChr", "mshow", "mshp", "msPre", "msPrePr", "msSub",
        "msSubPr", "msSubSup", "msSubSupPr", "msSup", "msSupPr", "mstrikeBLTR", "mstrikeH",
        "mstrikeTLBR", "mstrikeV", "msub", "msubHide", "msup", "msupHide", "mtransp", "mtype",
        "mvertJc", "mvfmf", "mvfml", "mvtof", "mvtol", "mzeroAsc", "mzeroDesc", "mzeroWid",
        "nesttableprops", "nextfile", "nonesttables", "objalias", "objclass", "objdata",
        "object", "objname", "objsect", "objtime", "oldcprops", "oldpprops", "oldsprops",
        "oldtprops", "oleclsid", "operator", "panose", "password", "passwordhash", "pgp",
        "pgptbl", "picprop", "pict", "pn", "pnseclvl", "pntext", "pntxta", "pntxtb",
        "printim", "private", "propname", "protend", "protstart", "protusertbl", "pxe",
        "result", "revtbl", "revtim", "rsidtbl", "rxe", "shp", "shpgrp", "shpinst",
        "shppict", "shprslt", "shptxt", "sn", "sp", "staticval", "stylesheet", "subject", "sv",
        "svb", "tc", "template", "themedata", "title", "txe", "ud", "upr", "userprops",
        "wgrffmtfilter", "windowcaption", "writereservation", "writereservhash", "xe",
        "xform", "xmlattrname", "xmlattrvalue", "xmlclose", "xmlname", "xmlnstbl", "xmlopen",
    ];

    fn special_char(word: &str) -> Option<&'static str> {
        Some(match word {
            "par" | "line" | "row" => "\n",
            "sect" | "page" => "\n\n",
            "tab" => "\t",
            "emdash" => "\u{2014}",
            "endash" => "\u{2013}",
            "emspace" => "\u{2003}",
            "enspace" => "\u{2002}",
            "qmspace" => "\u{2005}",
            "bullet" => "\u{2022}",
            "lquote" => "\u{2018}",
            "rquote" => "\u{2019}",
            "ldblquote" => "\u{201C}",
            "rdblquote" => "\u{201D}",
            "cell" | "nestcell" => "|",
            _ => return None,
        })
    }

    /// Encoding for a Windows code page number as used by `\ansicpgN`.
    pub fn code_page_encoding(code_page: i32) -> Option<&'static Encoding> {
        let label = match code_page {
            874 => "windows-874",
            932 => "shift_jis",
            936 => "gb18030",
            949 => "euc-kr",
            950 => "big5",
            1250..=1258 => return Encoding::for_label(format!("windows-{}", code_page).as_bytes()),
            10000 => "macintosh",
            65001 => "utf-8",
            _ => return None,
        };
        Encoding::for_label(label.as_bytes())
    }

    /// Decoder state for one pass over an RTF document.
    struct Stripper {
        out: String,
        /// (uc skip count, ignorable) saved at each `{`
        stack: Vec<(usize, bool)>,
        ignorable: bool,
        ucskip: usize,
        curskip: usize,
        encoding: &'static Encoding,
        pending: Vec<u8>,
    }

    impl Stripper {
        fn new() -> Self {
            Self {
                out: String::new(),
                stack: Vec::new(),
                ignorable: false,
                ucskip: 1,
                curskip: 0,
                encoding: encoding_rs::WINDOWS_1252,
                pending: Vec::new(),
            }
        }

        fn flush_bytes(&mut self) {
            if self.pending.is_empty() {
                return;
            }
            let (decoded, _, _) = self.encoding.decode(&self.pending);
            self.out.push_str(&decoded);
            self.pending.clear();
        }

        fn emit(&mut self, text: &str) {
            if !self.ignorable {
                self.out.push_str(text);
            }
        }

        fn control_word(&mut self, word: &str, arg: Option<&str>) {
            self.curskip = 0;
            if DESTINATIONS.contains(&word) {
                self.ignorable = true;
                return;
            }
            if word == "ansicpg" {
                match arg.and_then(|a| a.parse().ok()).and_then(code_page_encoding) {
                    Some(encoding) => self.encoding = encoding,
                    None => log::warn!("unknown RTF code page {:?}, keeping {}", arg, self.encoding.name()),
                }
                return;
            }
            if self.ignorable {
                return;
            }
            if let Some(text) = special_char(word) {
                self.out.push_str(text);
                return;
            }
            match word {
                "uc" => {
                    self.ucskip = arg.and_then(|a| a.parse().ok()).unwrap_or(1);
                }
                "u" => {
                    let Some(mut code) = arg.and_then(|a| a.parse::<i32>().ok()) else {
                        return;
                    };
                    if code < 0 {
                        code += 0x10000;
                    }
                    let c = u32::try_from(code)
                        .ok()
                        .and_then(char::from_u32)
                        .unwrap_or(char::REPLACEMENT_CHARACTER);
                    self.out.push(c);
                    self.curskip = self.ucskip;
                }
                _ => {}
            }
        }

        fn control_symbol(&mut self, symbol: &str) {
            self.curskip = 0;
            match symbol {
                "*" => self.ignorable = true,
                "~" => self.emit("\u{a0}"),
                "{" | "}" | "\\" => self.emit(symbol),
                "_" => self.emit("\u{2011}"),
                "\n" | "\r" => self.emit("\n"),
                _ => {}
            }
        }
    }

    /// Strip RTF control words and groups, returning the document text.
    pub fn rtf_to_text(rtf: &str) -> Result<String> {
        let tokens = token_regex()?;
        let mut state = Stripper::new();

        for caps in tokens.captures_iter(rtf) {
            let hex = caps.get(3);
            if hex.is_none() {
                state.flush_bytes();
            }

            if let Some(brace) = caps.get(5) {
                state.curskip = 0;
                if brace.as_str() == "{" {
                    state.stack.push((state.ucskip, state.ignorable));
                } else if let Some((ucskip, ignorable)) = state.stack.pop() {
                    state.ucskip = ucskip;
                    state.ignorable = ignorable;
                }
            } else if let Some(symbol) = caps.get(4) {
                state.control_symbol(symbol.as_str());
            } else if let Some(word) = caps.get(1) {
                state.control_word(word.as_str(), caps.get(2).map(|m| m.as_str()));
            } else if let Some(hex) = hex {
                if state.curskip > 0 {
                    state.curskip -= 1;
                } else if !state.ignorable {
                    if let Ok(byte) = u8::from_str_radix(hex.as_str(), 16) {
                        state.pending.push(byte);
                    }
                }
            } else if let Some(ch) = caps.get(6) {
                if state.curskip > 0 {
                    state.curskip -= 1;
                } else if !state.ignorable {
                    state.out.push_str(ch.as_str());
                }
            }
        }
        state.flush_bytes();

        if !state.stack.is_empty() {
            log::debug!("RTF input has {} unclosed groups", state.stack.len());
        }
        Ok(state.out)
    }
}
