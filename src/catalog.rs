//! Static optimization catalog: debloat actions, essential apps, quick fixes.
//!
//! The catalog is compile-time data. Nothing here validates or transforms the
//! records beyond lookup and OS-variant filtering; commands are advisory
//! strings for the user to run manually, never executed by this tool.

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

/// Targeted Windows release. Catalog records and advice prompts use the
/// short wire tags (`win10`/`win11`); `Display` is human-facing.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WindowsVersion {
    Win10,
    Win11,
}

impl WindowsVersion {
    /// Short tag as it appears in catalog records and prompts.
    pub fn tag(&self) -> &'static str {
        match self {
            WindowsVersion::Win10 => "win10",
            WindowsVersion::Win11 => "win11",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            WindowsVersion::Win10 => WindowsVersion::Win11,
            WindowsVersion::Win11 => WindowsVersion::Win10,
        }
    }
}

impl fmt::Display for WindowsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowsVersion::Win10 => write!(f, "Windows 10"),
            WindowsVersion::Win11 => write!(f, "Windows 11"),
        }
    }
}

/// Which Windows releases a debloat record applies to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Applicability {
    Win10,
    Win11,
    Both,
}

impl Applicability {
    pub fn matches(&self, version: WindowsVersion) -> bool {
        match self {
            Applicability::Both => true,
            Applicability::Win10 => version == WindowsVersion::Win10,
            Applicability::Win11 => version == WindowsVersion::Win11,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    System,
    Apps,
    Privacy,
    Performance,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::System => "system",
            Category::Apps => "apps",
            Category::Privacy => "privacy",
            Category::Performance => "performance",
        };
        write!(f, "{label}")
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Impact::Low => "low",
            Impact::Medium => "medium",
            Impact::High => "high",
        };
        write!(f, "{label}")
    }
}

/// A removable or disableable Windows component.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct DebloatItem {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub impact: Impact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<&'static str>,
    pub applies_to: Applicability,
}

/// A recommended third-party replacement app.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct EssentialApp {
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub url: &'static str,
    pub winget: &'static str,
    pub icon: &'static str,
}

/// A one-off manual adjustment with an optional literal command.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct FixItem {
    pub title: &'static str,
    pub description: &'static str,
    pub solution: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

const DEBLOAT_ITEMS: &[DebloatItem] = &[
    DebloatItem {
        id: "1",
        title: "Cortana Assistant",
        description: "Microsoft's legacy voice assistant that remains in the system even if unused.",
        category: Category::Apps,
        impact: Impact::Medium,
        command: Some("Get-AppxPackage -allusers Microsoft.549981C3F5F10 | Remove-AppxPackage"),
        applies_to: Applicability::Win10,
    },
    DebloatItem {
        id: "2",
        title: "Windows Copilot",
        description: "The new AI assistant integrated into Windows 11 taskbar and sidebar.",
        category: Category::Apps,
        impact: Impact::Medium,
        command: Some(
            "reg add \"HKCU\\Software\\Microsoft\\Windows\\CurrentVersion\\Explorer\\Advanced\" /v ShowCopilotButton /t REG_DWORD /d 0 /f",
        ),
        applies_to: Applicability::Win11,
    },
    DebloatItem {
        id: "storage-1",
        title: "Cleanup System Component Store (WinSxS)",
        description: "Removes old versions of system components replaced by Windows Updates. Can save 5GB-15GB+.",
        category: Category::Performance,
        impact: Impact::High,
        command: Some("dism.exe /online /Cleanup-Image /StartComponentCleanup /ResetBase"),
        applies_to: Applicability::Both,
    },
    DebloatItem {
        id: "storage-2",
        title: "Compact OS Compression",
        description: "Compresses Windows system files and applications to save space on small drives.",
        category: Category::Performance,
        impact: Impact::High,
        command: Some("compact.exe /CompactOS:always"),
        applies_to: Applicability::Both,
    },
    DebloatItem {
        id: "storage-3",
        title: "Disable Hibernation (Remove hiberfil.sys)",
        description: "Deletes the file used for Fast Startup and Hibernation. Saves space equal to ~75% of your RAM.",
        category: Category::Performance,
        impact: Impact::High,
        command: Some("powercfg -h off"),
        applies_to: Applicability::Both,
    },
    DebloatItem {
        id: "edge",
        title: "Microsoft Edge Bloat",
        description: "The default browser, which often has many \"shopping\" and \"news\" features enabled by default.",
        category: Category::Apps,
        impact: Impact::High,
        command: Some(
            "# Manual removal is complex; best handled via group policy or specialized scripts.",
        ),
        applies_to: Applicability::Both,
    },
    DebloatItem {
        id: "xbox",
        title: "Xbox Game Bar & Services",
        description: "Overlay and background services for gaming features, even for non-gamers.",
        category: Category::Apps,
        impact: Impact::Medium,
        command: Some("Get-AppxPackage Microsoft.XboxGamingOverlay | Remove-AppxPackage"),
        applies_to: Applicability::Both,
    },
    DebloatItem {
        id: "3",
        title: "OneDrive Cloud Storage",
        description: "Cloud storage integration that starts with Windows and manages file sync.",
        category: Category::System,
        impact: Impact::High,
        command: Some(
            "taskkill /f /im OneDrive.exe; %SystemRoot%\\SysWOW64\\OneDriveSetup.exe /uninstall",
        ),
        applies_to: Applicability::Both,
    },
    DebloatItem {
        id: "4",
        title: "Telemetry & Diagnostic Data",
        description: "Services that collect and send usage data to Microsoft servers.",
        category: Category::Privacy,
        impact: Impact::High,
        command: Some("sc config \"DiagTrack\" start= disabled; sc stop \"DiagTrack\""),
        applies_to: Applicability::Both,
    },
    DebloatItem {
        id: "news",
        title: "News & Interests (Widgets)",
        description: "The taskbar weather and news feed that consumes background resources.",
        category: Category::Performance,
        impact: Impact::Low,
        command: Some(
            "reg add \"HKCU\\Software\\Microsoft\\Windows\\CurrentVersion\\Feeds\" /v \"ShellFeedsTaskbarViewMode\" /t REG_DWORD /d 2 /f",
        ),
        applies_to: Applicability::Both,
    },
];

const ESSENTIAL_APPS: &[EssentialApp] = &[
    EssentialApp {
        name: "NanaZip",
        category: "Utility",
        description: "Modern, open-source file archiver. The superior alternative to the built-in Windows Zip tool.",
        url: "https://github.com/M2Team/NanaZip",
        winget: "winget install M2Team.NanaZip",
        icon: "fa-file-zipper",
    },
    EssentialApp {
        name: "PowerToys",
        category: "System",
        description: "Advanced system utilities including Window snapping, color picker, and bulk renamer.",
        url: "https://github.com/microsoft/PowerToys",
        winget: "winget install Microsoft.PowerToys",
        icon: "fa-screwdriver-wrench",
    },
    EssentialApp {
        name: "Everything",
        category: "Search",
        description: "Instant file search for Windows. Makes the default Start Menu search look like a dinosaur.",
        url: "https://www.voidtools.com/",
        winget: "winget install voidtools.Everything",
        icon: "fa-magnifying-glass",
    },
    EssentialApp {
        name: "Brave Browser",
        category: "Browser",
        description: "Privacy-focused browser. Blocks trackers that built-in Edge often allows.",
        url: "https://brave.com/",
        winget: "winget install Brave.Brave",
        icon: "fa-globe",
    },
    EssentialApp {
        name: "VLC Media Player",
        category: "Media",
        description: "Plays everything. No more \"Missing Codec\" errors from Windows Media Player.",
        url: "https://www.videolan.org/",
        winget: "winget install VideoLAN.VLC",
        icon: "fa-play",
    },
    EssentialApp {
        name: "BleachBit",
        category: "Cleanup",
        description: "Clean your system deeply. Much more thorough than \"Disk Cleanup\".",
        url: "https://www.bleachbit.org/",
        winget: "winget install BleachBit.BleachBit",
        icon: "fa-broom",
    },
];

const QUICK_FIXES: &[FixItem] = &[
    FixItem {
        title: "Disable Bing in Start Search",
        description: "Stops Windows from showing web results when you search for local files.",
        solution: "Modify the registry to disable Bing Search.",
        code: Some(
            "reg add \"HKCU\\Software\\Policies\\Microsoft\\Windows\\Explorer\" /v DisableSearchBoxSuggestions /t REG_DWORD /d 1 /f",
        ),
    },
    FixItem {
        title: "Enable Classic Context Menu",
        description: "Restores the Windows 10 style right-click menu in Windows 11 (removes \"Show more options\").",
        solution: "Add a registry key and restart Explorer.",
        code: Some(
            "reg add \"HKCU\\Software\\Classes\\CLSID\\{86ca1aa0-34aa-4e8b-a509-50c905bae2a2}\\InprocServer32\" /f /ve",
        ),
    },
    FixItem {
        title: "Remove \"Recommended\" from Start",
        description: "Cleans up the clutter in the Windows 11 Start Menu.",
        solution: "Change Settings or use this registry tweak.",
        code: Some(
            "reg add \"HKCU\\Software\\Microsoft\\Windows\\CurrentVersion\\Explorer\\Advanced\" /v \"Start_TrackDocs\" /t REG_DWORD /d 0 /f",
        ),
    },
];

/// Full debloat catalog, unfiltered.
pub fn debloat_items() -> &'static [DebloatItem] {
    DEBLOAT_ITEMS
}

pub fn essential_apps() -> &'static [EssentialApp] {
    ESSENTIAL_APPS
}

pub fn quick_fixes() -> &'static [FixItem] {
    QUICK_FIXES
}

/// Debloat records applicable to `version` (version-specific or `both`).
pub fn debloat_for(version: WindowsVersion) -> impl Iterator<Item = &'static DebloatItem> {
    DEBLOAT_ITEMS
        .iter()
        .filter(move |item| item.applies_to.matches(version))
}

/// Look up a debloat record by its identifier.
pub fn find_debloat(id: &str) -> Option<&'static DebloatItem> {
    DEBLOAT_ITEMS.iter().find(|item| item.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_matches_version_or_both() {
        for version in [WindowsVersion::Win10, WindowsVersion::Win11] {
            let filtered: Vec<_> = debloat_for(version).collect();
            for item in &filtered {
                assert!(
                    item.applies_to.matches(version),
                    "{} leaked into {} listing",
                    item.id,
                    version.tag()
                );
            }
            let excluded = DEBLOAT_ITEMS.len() - filtered.len();
            let other: usize = DEBLOAT_ITEMS
                .iter()
                .filter(|item| !item.applies_to.matches(version))
                .count();
            assert_eq!(excluded, other);
        }
    }

    #[test]
    fn win10_excludes_copilot_includes_cortana() {
        let ids: Vec<_> = debloat_for(WindowsVersion::Win10)
            .map(|item| item.id)
            .collect();
        assert!(ids.contains(&"1"));
        assert!(!ids.contains(&"2"));
        // Everything tagged both is present on either version.
        assert!(ids.contains(&"storage-1"));
        assert_eq!(ids.len(), 9);
    }

    #[test]
    fn win11_excludes_cortana_includes_copilot() {
        let ids: Vec<_> = debloat_for(WindowsVersion::Win11)
            .map(|item| item.id)
            .collect();
        assert!(ids.contains(&"2"));
        assert!(!ids.contains(&"1"));
        assert_eq!(ids.len(), 9);
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(find_debloat("xbox").map(|item| item.title), Some("Xbox Game Bar & Services"));
        assert!(find_debloat("missing").is_none());
    }

    #[test]
    fn catalog_counts_are_stable() {
        assert_eq!(debloat_items().len(), 10);
        assert_eq!(essential_apps().len(), 6);
        assert_eq!(quick_fixes().len(), 3);
    }
}
