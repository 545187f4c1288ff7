//! `lastKnownFileType` values for new file references

/// Xcode's file type identifier for a file extension.
///
/// Unknown extensions have no type; Xcode infers one when the project is
/// next opened.
pub fn last_known_file_type(extension: &str) -> Option<&'static str> {
    let file_type = match extension {
        "swift" => "sourcecode.swift",
        "h" => "sourcecode.c.h",
        "c" => "sourcecode.c.c",
        "m" => "sourcecode.c.objc",
        "mm" => "sourcecode.cpp.objcpp",
        "cpp" | "cc" | "cxx" => "sourcecode.cpp.cpp",
        "hpp" => "sourcecode.cpp.h",
        "metal" => "sourcecode.metal",
        "json" => "text.json",
        "plist" => "text.plist.xml",
        "strings" => "text.plist.strings",
        "xib" => "file.xib",
        "storyboard" => "file.storyboard",
        "xcassets" => "folder.assetcatalog",
        "md" => "net.daringfireball.markdown",
        _ => return None,
    };
    Some(file_type)
}
